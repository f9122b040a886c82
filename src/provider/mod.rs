//! Session data provider abstraction
//!
//! The analyzer never touches the network or the filesystem itself: all
//! timing data flows through this trait, so tests can inject in-memory
//! fixtures and callers can swap the archive reader for any other source.

pub mod archive;

pub use archive::ArchiveSessionProvider;

use crate::error::Result;
use crate::models::session::{EventDescriptor, LoadOptions, SessionHandle};
use crate::types::SessionKind;
use async_trait::async_trait;

/// Source of session timing data for a season
#[async_trait]
pub trait SessionDataProvider: Send + Sync {
    /// Event schedule for a season, in round order
    ///
    /// Fails with `DataUnavailable` when the season is not covered.
    async fn schedule(&self, season: u16) -> Result<Vec<EventDescriptor>>;

    /// Handle for one session of an event
    ///
    /// Fails with `DataUnavailable` when the session does not exist.
    async fn session(
        &self,
        season: u16,
        event: &str,
        kind: SessionKind,
    ) -> Result<SessionHandle>;

    /// Populate the handle with lap and result data
    ///
    /// May fail with `DataUnavailable` (e.g. a missing archive entry); the
    /// caller skips the offending event/session pair and continues.
    async fn load(&self, handle: &mut SessionHandle, options: &LoadOptions) -> Result<()>;

    /// Fetch and load a session in one step
    async fn load_session(
        &self,
        season: u16,
        event: &str,
        kind: SessionKind,
        options: &LoadOptions,
    ) -> Result<SessionHandle> {
        let mut handle = self.session(season, event, kind).await?;
        self.load(&mut handle, options).await?;
        Ok(handle)
    }
}
