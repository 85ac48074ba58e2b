use crate::core::identity::model::Identity;
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tracing::info;

/// Session-side identity state. The sign-in, sign-up and OAuth
/// completion callbacks all funnel into `establish`; `sign_out`
/// drops the identity again.
#[derive(Default)]
pub struct IdentitySession {
    current: ArcSwapOption<Identity>,
}

impl IdentitySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn establish(&self, identity: Identity) {
        info!("Session established for {}", identity.email);
        self.current.store(Some(Arc::new(identity)));
    }

    pub fn current(&self) -> Option<Arc<Identity>> {
        self.current.load_full()
    }

    pub fn sign_out(&self) {
        self.current.store(None);
        info!("Session signed out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_establish_and_sign_out() {
        let session = IdentitySession::new();
        assert!(session.current().is_none());

        session.establish(Identity::new("a@b.com").unwrap());
        assert_eq!(session.current().unwrap().email, "a@b.com");

        session.sign_out();
        assert!(session.current().is_none());
    }
}
