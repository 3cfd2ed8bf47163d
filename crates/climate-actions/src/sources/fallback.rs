use super::{ActionSource, SourceError};
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Reads from `primary`, switching to `secondary` when the primary fails.
/// When both fail the secondary's error is returned.
#[derive(Debug, Clone)]
pub struct FallbackSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<P, S> ActionSource for FallbackSource<P, S>
where
    P: ActionSource,
    S: ActionSource,
{
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        match self.primary.fetch().await {
            Ok(payload) => Ok(payload),
            Err(err) => {
                warn!(
                    primary = self.primary.name(),
                    secondary = self.secondary.name(),
                    error = %err,
                    "primary source failed, falling back"
                );
                self.secondary.fetch().await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        payload: Option<Value>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn ok(payload: Value) -> Self {
            Self {
                payload: Some(payload),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                payload: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ActionSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch(&self) -> Result<Value, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.payload
                .clone()
                .ok_or(SourceError::Status { status: 503 })
        }
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let source = FallbackSource::new(Fixed::ok(json!(["sheet"])), Fixed::ok(json!(["file"])));
        assert_eq!(source.fetch().await.expect("fetch"), json!(["sheet"]));
        assert_eq!(source.secondary.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn primary_failure_uses_secondary() {
        let source = FallbackSource::new(Fixed::failing(), Fixed::ok(json!(["file"])));
        assert_eq!(source.fetch().await.expect("fetch"), json!(["file"]));
        assert_eq!(source.primary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn both_failing_surfaces_an_error() {
        let source = FallbackSource::new(Fixed::failing(), Fixed::failing());
        assert!(matches!(
            source.fetch().await,
            Err(SourceError::Status { status: 503 })
        ));
        assert_eq!(source.secondary.calls.load(Ordering::SeqCst), 1);
    }
}
