//! REST endpoint bindings.
//!
//! `DevlaunchApi` implements the core API traits on top of the
//! [`RequestGateway`](crate::gateway::RequestGateway); one impl block per
//! collaborator area, each in its own file.

mod auth;
mod courses;

use std::sync::Arc;

use crate::gateway::RequestGateway;

/// HTTP implementation of [`devlaunch_core::api::AuthApi`] and
/// [`devlaunch_core::api::CourseApi`].
#[derive(Clone)]
pub struct DevlaunchApi {
    gateway: Arc<RequestGateway>,
}

impl DevlaunchApi {
    pub fn new(gateway: Arc<RequestGateway>) -> Self {
        Self { gateway }
    }

    pub(crate) fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }
}
