//! Cache layer
//!
//! `ObjectCache` stores serialized values by key. Backends register
//! themselves in a name -> constructor registry so startup can pick one from
//! configuration and fall back to the in-memory backend.

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// Declares a cache backend: generates an async constructor and a
/// `register()` function adding it to the registry under `$name`.
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub const PLUGIN_NAME: &str = $name;

        pub fn register() {
            $crate::cache::register::register_object_cache_plugin(
                PLUGIN_NAME,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        match <$ty>::new().await {
                            Ok(cache) => Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>),
                            Err(e) => Err($crate::errors::DlmsError::cache_connection(format!(
                                "{} backend init failed: {}",
                                PLUGIN_NAME, e
                            ))),
                        }
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}
