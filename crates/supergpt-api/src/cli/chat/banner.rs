//! Welcome banner display for chat sessions.

use console::style;

use supergpt_types::persona::Persona;

fn tagline(persona: Persona) -> &'static str {
    match persona {
        Persona::ChatAssistant => "Products, clients, scheduling and design advice",
        Persona::ImageAssistant => "Describe a piece or a room and refine it into an image prompt",
        Persona::FloorPlanAssistant => "Room layouts, clearances and furniture placement",
        Persona::RenderAssistant => "Materials, lighting and presentation for 3D renders",
    }
}

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(persona: Persona, session_key: &str, model: &str, configured: bool) {
    println!();
    println!("  {} {}", style("*").cyan().bold(), style(persona.label()).cyan().bold());
    println!("  {}", style(tagline(persona)).dim());
    println!();
    println!("  {}    {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Session:").bold(), style(session_key).dim());
    if !configured {
        println!();
        println!(
            "  {} No API key found. Run {} for setup details.",
            style("!").yellow().bold(),
            style("sgpt config").cyan()
        );
    }
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}
