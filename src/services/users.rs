//! Users service

use crate::{
    error::AppResult,
    models::user::{CreateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a user. A `bookId` of 0 is stored as no reference; any other
    /// id must name an existing book.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let user = self
            .repository
            .users
            .create(&data.username, &data.name, data.book_ref())
            .await?;
        tracing::info!("User created: id={} book_id={}", user.id, user.book_id);
        Ok(user)
    }
}
