//! Profile update arguments

use chrono::NaiveDate;
use clap::Args;

use crate::client::models::UserIdentity;

/// Fields to change; anything not given keeps its current value
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileUpdateArgs {
    /// New username
    #[arg(long)]
    pub username: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// Full name
    #[arg(long)]
    pub full_name: Option<String>,

    /// Photo URL
    #[arg(long)]
    pub photo_url: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: Option<NaiveDate>,
}

impl ProfileUpdateArgs {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.full_name.is_none()
            && self.photo_url.is_none()
            && self.phone.is_none()
            && self.birth_date.is_none()
    }

    /// `user` with the requested changes applied
    pub fn apply(&self, mut user: UserIdentity) -> UserIdentity {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(full_name) = &self.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(photo_url) = &self.photo_url {
            user.photo_url = photo_url.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone_number = phone.clone();
        }
        if let Some(birth_date) = self.birth_date {
            user.birth_date = Some(birth_date);
        }
        user
    }
}
