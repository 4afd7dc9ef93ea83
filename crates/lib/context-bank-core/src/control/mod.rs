use std::{error::Error, fmt, sync::Arc};

use crate::client::{ClientError, OnyxClient, Transport};

pub mod chat;
pub mod search;

#[derive(Debug)]
pub enum ControlError {
    Client(ClientError),
    /// The backend answered but left out a field the operation needs.
    MissingField(&'static str),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(err) => write!(f, "{err}"),
            Self::MissingField(field) => write!(f, "response is missing {field}"),
        }
    }
}

impl Error for ControlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client(err) => Some(err),
            Self::MissingField(_) => None,
        }
    }
}

impl From<ClientError> for ControlError {
    fn from(err: ClientError) -> Self {
        Self::Client(err)
    }
}

/// Per-operation entry points over a shared Onyx client.
pub struct OnyxControlPlane<T: Transport> {
    client: Arc<OnyxClient<T>>,
}

impl<T: Transport> Clone for OnyxControlPlane<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Transport> OnyxControlPlane<T> {
    #[must_use]
    pub fn new(client: OnyxClient<T>) -> Self {
        Self::from_arc(Arc::new(client))
    }

    #[must_use]
    pub const fn from_arc(client: Arc<OnyxClient<T>>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &OnyxClient<T> {
        &self.client
    }
}
