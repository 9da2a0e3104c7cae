//! The gist operations as a trait.
//!
//! [`GistApi`] lets the synchronizer be handed any implementation of the
//! four gist calls: the real [`GitHubClient`] in production, a scripted
//! fake in tests.

use std::future::Future;

use secrecy::SecretString;

use crate::client::GitHubClient;
use crate::error::Result;
use crate::gist::{GistRequest, GistResult};
use crate::user::UserInfo;

/// The GitHub calls needed to mirror posts into gists.
pub trait GistApi {
    /// Fetches the account the access token belongs to.
    fn get_user(
        &self,
        username: &str,
        access_token: &SecretString,
    ) -> impl Future<Output = Result<UserInfo>> + Send;

    /// Fetches a single gist.
    fn get_gist(
        &self,
        id: &str,
        access_token: &SecretString,
    ) -> impl Future<Output = Result<GistResult>> + Send;

    /// Creates a new gist.
    fn create_gist(
        &self,
        access_token: &SecretString,
        request: &GistRequest,
    ) -> impl Future<Output = Result<GistResult>> + Send;

    /// Updates an existing gist.
    fn edit_gist(
        &self,
        id: &str,
        access_token: &SecretString,
        request: &GistRequest,
    ) -> impl Future<Output = Result<GistResult>> + Send;
}

impl GistApi for GitHubClient {
    async fn get_user(&self, username: &str, access_token: &SecretString) -> Result<UserInfo> {
        GitHubClient::get_user(self, username, access_token).await
    }

    async fn get_gist(&self, id: &str, access_token: &SecretString) -> Result<GistResult> {
        GitHubClient::get_gist(self, id, access_token).await
    }

    async fn create_gist(
        &self,
        access_token: &SecretString,
        request: &GistRequest,
    ) -> Result<GistResult> {
        GitHubClient::create_gist(self, access_token, request).await
    }

    async fn edit_gist(
        &self,
        id: &str,
        access_token: &SecretString,
        request: &GistRequest,
    ) -> Result<GistResult> {
        GitHubClient::edit_gist(self, id, access_token, request).await
    }
}

impl<T: GistApi + ?Sized> GistApi for &T {
    fn get_user(
        &self,
        username: &str,
        access_token: &SecretString,
    ) -> impl Future<Output = Result<UserInfo>> + Send {
        (**self).get_user(username, access_token)
    }

    fn get_gist(
        &self,
        id: &str,
        access_token: &SecretString,
    ) -> impl Future<Output = Result<GistResult>> + Send {
        (**self).get_gist(id, access_token)
    }

    fn create_gist(
        &self,
        access_token: &SecretString,
        request: &GistRequest,
    ) -> impl Future<Output = Result<GistResult>> + Send {
        (**self).create_gist(access_token, request)
    }

    fn edit_gist(
        &self,
        id: &str,
        access_token: &SecretString,
        request: &GistRequest,
    ) -> impl Future<Output = Result<GistResult>> + Send {
        (**self).edit_gist(id, access_token, request)
    }
}
