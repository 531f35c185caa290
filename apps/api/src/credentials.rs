use std::sync::RwLock;

use secrecy::SecretString;

type Loader = Box<dyn Fn() -> Option<SecretString> + Send + Sync>;

/// Holds the completion-service API key for the delegated scorer.
///
/// The key is resolved lazily through an injected loader the first time it is
/// needed and reused afterwards. A key supplied at runtime via [`set`](Self::set)
/// replaces whatever is cached; concurrent writers race harmlessly (last write wins).
pub struct CredentialStore {
    cached: RwLock<Option<SecretString>>,
    loader: Loader,
}

impl CredentialStore {
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Option<SecretString> + Send + Sync + 'static,
    {
        Self {
            cached: RwLock::new(None),
            loader: Box::new(loader),
        }
    }

    /// A store seeded from a configured value, if any.
    pub fn from_configured(key: Option<SecretString>) -> Self {
        Self::with_loader(move || key.clone())
    }

    pub fn get(&self) -> Option<SecretString> {
        if let Some(key) = self
            .cached
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return Some(key.clone());
        }

        // Loader only runs until it yields a key; a miss is retried on the next call.
        let loaded = (self.loader)()?;
        let mut cached = self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(cached.get_or_insert(loaded).clone())
    }

    pub fn set(&self, key: SecretString) {
        *self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(key);
    }

    pub fn is_configured(&self) -> bool {
        self.get().is_some()
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_loader_runs_once_when_it_yields_a_key() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let store = CredentialStore::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(SecretString::from("sk-ambient".to_string()))
        });

        assert_eq!(store.get().unwrap().expose_secret(), "sk-ambient");
        assert_eq!(store.get().unwrap().expose_secret(), "sk-ambient");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_missing_key_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let store = CredentialStore::with_loader(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        });

        assert!(store.get().is_none());
        assert!(!store.is_configured());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_set_overrides_loaded_key() {
        let store = CredentialStore::from_configured(Some(SecretString::from("sk-env".to_string())));
        assert_eq!(store.get().unwrap().expose_secret(), "sk-env");

        store.set(SecretString::from("sk-user".to_string()));
        assert_eq!(store.get().unwrap().expose_secret(), "sk-user");
    }

    #[test]
    fn test_set_without_loader_key() {
        let store = CredentialStore::from_configured(None);
        assert!(store.get().is_none());
        store.set(SecretString::from("sk-user".to_string()));
        assert!(store.is_configured());
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let store = CredentialStore::from_configured(Some(SecretString::from("sk-secret".to_string())));
        store.get();
        assert!(!format!("{store:?}").contains("sk-secret"));
    }
}
