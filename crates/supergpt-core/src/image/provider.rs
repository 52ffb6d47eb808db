//! ImageProvider trait and its object-safe wrapper.
//!
//! Same blanket-impl pattern as [`crate::llm::box_provider::BoxLlmProvider`].

use std::future::Future;
use std::pin::Pin;

use supergpt_types::image::{GeneratedImage, ImageRequest};
use supergpt_types::llm::LlmError;

/// Trait for image-generation backends (DALL-E, ...).
///
/// Implementations live in supergpt-infra.
pub trait ImageProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai-images").
    fn name(&self) -> &str;

    /// Generate one square image for the request's prompt.
    fn generate(
        &self,
        request: &ImageRequest,
    ) -> impl Future<Output = Result<GeneratedImage, LlmError>> + Send;
}

/// Object-safe version of [`ImageProvider`].
pub trait ImageProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        request: &'a ImageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage, LlmError>> + Send + 'a>>;
}

impl<T: ImageProvider> ImageProviderDyn for T {
    fn name(&self) -> &str {
        ImageProvider::name(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: &'a ImageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<GeneratedImage, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(request))
    }
}

/// Type-erased image provider.
pub struct BoxImageProvider {
    inner: Box<dyn ImageProviderDyn + Send + Sync>,
}

impl BoxImageProvider {
    pub fn new<T: ImageProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, LlmError> {
        self.inner.generate_boxed(request).await
    }
}

impl std::fmt::Debug for BoxImageProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxImageProvider")
            .field("name", &self.name())
            .finish()
    }
}
