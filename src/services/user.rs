//! User service implementation
//!
//! Registration, member listings, the random-member pick and the
//! inactivity nudge. Listing methods return the composed message text;
//! the calling command decides where to send it.

use tracing::{debug, info, warn};
use crate::database::repositories::{JokeRepository, RegistrationOutcome, UserRepository};
use crate::i18n::messages;
use crate::models::joke::JokeType;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use crate::utils::errors::Result;
use crate::utils::format::{list_users, mention_user, tag_inactive_users, tag_users};
use crate::utils::validation::UserEditArgs;

/// How a member listing is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// Numbered mentions that ping everyone
    Tag,
    /// Plain names, no pings
    Show,
}

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    jokes: JokeRepository,
}

impl UserService {
    pub fn new(users: UserRepository, jokes: JokeRepository) -> Self {
        Self { users, jokes }
    }

    /// Register the sender, returning the user-facing outcome text
    pub async fn register_user(&self, request: CreateUserRequest) -> String {
        let user_id = request.user_id;
        match self.users.add_user(request).await {
            Ok(RegistrationOutcome::Registered) => {
                info!(user_id, "New user registered");
                messages::REGISTRATION_SUCCESS.to_string()
            }
            Ok(RegistrationOutcome::AddedToGroup) => {
                info!(user_id, "Existing user linked to group");
                messages::USER_ADDED_TO_GROUP.to_string()
            }
            Ok(RegistrationOutcome::AlreadyInGroup) => messages::USER_ALREADY_IN_GROUP.to_string(),
            Err(e) => {
                warn!(user_id, error = %e, "Registration failed");
                messages::ERROR_OCCURRED.to_string()
            }
        }
    }

    /// Registered members of a chat, tagged or listed. Non-admins get a
    /// taunt instead of the list.
    pub async fn get_registered_users(&self, chat_id: i64, format: ListFormat, is_admin: bool) -> String {
        if !is_admin {
            let joke = self
                .jokes
                .random_joke(JokeType::TagRegistered)
                .await
                .ok()
                .flatten()
                .unwrap_or_default();
            return format!("Только одмэн может массово беспокоить всех! {joke}")
                .trim_end()
                .to_string();
        }

        match self.users.get_users(chat_id).await {
            Ok(users) if users.is_empty() => messages::NO_REGISTERED_USERS.to_string(),
            Ok(users) => {
                let body = match format {
                    ListFormat::Tag => tag_users(&users),
                    ListFormat::Show => list_users(&users),
                };
                format!(
                    "Qeydiyyatdan keçmiş iştirakçılar\nЗарегистрированные участники:\n\n{body}"
                )
            }
            Err(e) => {
                warn!(chat_id, error = %e, "Failed to list registered users");
                messages::ERROR_OCCURRED.to_string()
            }
        }
    }

    /// Pick a random member and tell them to be clever
    pub async fn random_user_message(&self, chat_id: i64) -> String {
        match self.users.get_random_user(chat_id).await {
            Ok(None) => "Печально, когда некому говорить \"Ağıllı ol\" 🥲".to_string(),
            Ok(Some(user)) => {
                let flavor = self
                    .jokes
                    .random_joke(JokeType::RandomFact)
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or_else(|| "ağıllı ol! 🧠".to_string());
                format!("{}, {flavor}", mention_user(&user))
            }
            Err(e) => {
                warn!(chat_id, error = %e, "Failed to pick random user");
                messages::ERROR_OCCURRED.to_string()
            }
        }
    }

    /// Nudge members who keep skipping games
    pub async fn inactive_users_message(&self, chat_id: i64) -> String {
        match self.users.get_inactive_users(chat_id).await {
            Ok(users) if users.is_empty() => "Все активные, молодцы! 👏".to_string(),
            Ok(users) => {
                let joke = self
                    .jokes
                    .random_joke(JokeType::InactiveNudge)
                    .await
                    .ok()
                    .flatten()
                    .unwrap_or_default();
                format!(
                    "Значит так, \n\n{}\n\nпочему не посещаем игры? Бот негодуэ 🤨 {joke}",
                    tag_inactive_users(&users)
                )
                .trim_end()
                .to_string()
            }
            Err(e) => {
                warn!(chat_id, error = %e, "Failed to list inactive users");
                messages::ERROR_OCCURRED.to_string()
            }
        }
    }

    /// Admin edit of a member's names by internal id
    pub async fn edit_user(&self, args: UserEditArgs) -> String {
        let update = UpdateUserRequest {
            first_name: args.first_name,
            last_name: args.last_name,
            fullname_az: args.fullname_az,
        };

        match self.users.update(args.user_id, update).await {
            Ok(Some(user)) => {
                info!(user_db_id = user.id, "User profile edited by admin");
                format!(
                    "Готово! Теперь это {} {}",
                    user.first_name,
                    user.last_name.as_deref().unwrap_or_default()
                )
                .trim_end()
                .to_string()
            }
            Ok(None) => format!("Пользователь с ID {} не найден", args.user_id),
            Err(e) => {
                warn!(user_db_id = args.user_id, error = %e, "Failed to edit user");
                messages::ERROR_OCCURRED.to_string()
            }
        }
    }

    /// Fill in a placeholder row created by a first-time button press
    pub async fn backfill_placeholder(
        &self,
        user_id: i64,
        chat_id: i64,
        first_name: &str,
        last_name: Option<&str>,
        username: Option<&str>,
    ) -> Result<()> {
        if self
            .users
            .backfill_placeholder(user_id, chat_id, first_name, last_name, username)
            .await?
        {
            debug!(user_id, chat_id, "Backfilled placeholder user names");
        }
        Ok(())
    }

    /// Members of a chat for the admin-chat remote listing
    pub async fn users_of_chat(&self, chat_id: i64) -> Result<Vec<User>> {
        self.users.get_users_by_chat_id(chat_id).await
    }
}
