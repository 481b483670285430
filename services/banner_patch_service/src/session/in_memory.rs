use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use derive_new::new;

use crate::session::{Session, SessionStore, SessionStoreError};

#[derive(Clone, Debug, Default, new)]
pub struct InMemorySessionStore {
    sessions: Arc<HashMap<String, Session>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(
        &self,
        session_id: &str,
    ) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.get(session_id).cloned())
    }
}
