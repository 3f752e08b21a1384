//! In-memory log of client status checks

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Entries kept by [`StatusLog`]
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck
{   pub id: String
  , pub client_name: String
  , pub timestamp: DateTime<Utc>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheckCreate
{   pub client_name: String
}

/// Status checks, capped at [`RECENT_LIMIT`] newest entries
#[derive(Debug, Default)]
pub struct StatusLog
{   entries: RwLock<VecDeque<StatusCheck>>
}

impl StatusLog
{   pub fn new() -> Self
    {   StatusLog::default()
    }

    /// Record a check for `client_name`
    pub async fn record(&self, input: StatusCheckCreate) -> StatusCheck
    {   let check = StatusCheck
        {   id: uuid::Uuid::new_v4().to_string()
          , client_name: input.client_name
          , timestamp: Utc::now()
        };
        debug!("Recording status check from {}", check.client_name);
        let mut entries = self.entries.write().await;
        entries.push_back(check.clone());
        while entries.len() > RECENT_LIMIT
        {   entries.pop_front();
        }
        check
    }

    /// Latest checks, oldest first
    pub async fn recent(&self) -> Vec<StatusCheck>
    {   self.entries.read().await.iter().cloned().collect()
    }
}
