//! Admin group service implementation
//!
//! Cross-chat delegation: an admin chat may remote-control a managed chat
//! only through an explicit link, created by a creator and gated on the
//! acting user holding administrator role in the target chat.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ThreadId, UserId};
use tracing::{error, info};

use crate::database::repositories::AdminGroupRepository;
use crate::i18n::messages;
use crate::models::admin_group::AdminGroup;
use crate::services::messenger::BotMessenger;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct AdminGroupService {
    admin_groups: AdminGroupRepository,
    messenger: BotMessenger,
}

impl AdminGroupService {
    pub fn new(admin_groups: AdminGroupRepository, messenger: BotMessenger) -> Self {
        Self { admin_groups, messenger }
    }

    /// Link a managed chat to the issuing admin chat. The acting user must
    /// hold administrator role in the target chat right now.
    pub async fn connect_to_group(
        &self,
        target_chat_id: i64,
        admin_chat_id: ChatId,
        user_id: UserId,
        thread_id: Option<ThreadId>,
    ) {
        if let Err(e) = self
            .try_connect_to_group(target_chat_id, admin_chat_id, user_id, thread_id)
            .await
        {
            error!(target_chat_id, admin_chat_id = admin_chat_id.0, error = %e, "Failed to connect group");
            if let Err(e) = self
                .messenger
                .send_text(admin_chat_id, messages::ERROR_OCCURRED, thread_id)
                .await
            {
                error!(admin_chat_id = admin_chat_id.0, error = %e, "Failed to send apology");
            }
        }
    }

    async fn try_connect_to_group(
        &self,
        target_chat_id: i64,
        admin_chat_id: ChatId,
        user_id: UserId,
        thread_id: Option<ThreadId>,
    ) -> Result<()> {
        let bot = self.messenger.bot();
        let chat = bot.get_chat(ChatId(target_chat_id)).await?;
        let group_name = chat.title().unwrap_or("noname").to_string();

        let member = bot.get_chat_member(ChatId(target_chat_id), user_id).await?;
        if !member.is_administrator() && !member.is_owner() {
            self.messenger
                .send_text(admin_chat_id, messages::NOT_GROUP_ADMIN, thread_id)
                .await?;
            return Ok(());
        }

        self.admin_groups
            .add_admin_group(target_chat_id, admin_chat_id.0, &group_name)
            .await?;
        info!(target_chat_id, admin_chat_id = admin_chat_id.0, %group_name, "Admin group linked");

        self.messenger
            .send_text(
                admin_chat_id,
                format!(
                    "Группа {group_name} успешно связана с текущей. Теперь вы можете создавать игры, \
                     редактировать пользователей и игры отсюда!"
                ),
                thread_id,
            )
            .await?;
        Ok(())
    }

    /// List the chats managed from this admin chat
    pub async fn show_groups(&self, admin_chat_id: ChatId, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_show_groups(admin_chat_id, thread_id).await {
            error!(admin_chat_id = admin_chat_id.0, error = %e, "Failed to show groups");
        }
    }

    async fn try_show_groups(&self, admin_chat_id: ChatId, thread_id: Option<ThreadId>) -> Result<()> {
        let groups = self.admin_groups.get_groups(admin_chat_id.0).await?;
        if groups.is_empty() {
            self.messenger
                .send_text(admin_chat_id, messages::NO_LINKED_GROUPS, thread_id)
                .await?;
            return Ok(());
        }

        let list = groups
            .iter()
            .map(|g| format!("• {} (ID: {})", g.group_name, g.chat_id))
            .collect::<Vec<_>>()
            .join("\n");
        self.messenger
            .send_text(admin_chat_id, format!("Группы, которые вы админите:\n\n{list}"), thread_id)
            .await?;
        Ok(())
    }

    /// Render the managed chats as selection buttons for one remote command
    pub async fn show_groups_for_selection(
        &self,
        admin_chat_id: ChatId,
        command: &str,
        thread_id: Option<ThreadId>,
    ) -> Result<()> {
        let groups = self.admin_groups.get_groups(admin_chat_id.0).await?;
        if groups.is_empty() {
            self.messenger
                .send_text(admin_chat_id, messages::NO_LINKED_GROUPS, thread_id)
                .await?;
            return Ok(());
        }

        let rows: Vec<Vec<InlineKeyboardButton>> = groups
            .iter()
            .map(|group| {
                vec![InlineKeyboardButton::callback(
                    group.group_name.clone(),
                    format!("selectedGroupFor{command}_{}", group.chat_id),
                )]
            })
            .collect();

        self.messenger
            .send_with_keyboard(
                admin_chat_id,
                messages::CHOOSE_GROUP,
                InlineKeyboardMarkup::new(rows),
                thread_id,
            )
            .await?;
        Ok(())
    }

    /// Whether the issuing chat manages any other chats at all
    pub async fn has_linked_groups(&self, admin_chat_id: i64) -> Result<bool> {
        Ok(!self.admin_groups.get_groups(admin_chat_id).await?.is_empty())
    }

    /// Whether the admin chat is linked to one specific target chat
    pub async fn is_linked(&self, admin_chat_id: i64, chat_id: i64) -> Result<bool> {
        self.admin_groups.is_linked(admin_chat_id, chat_id).await
    }

    /// One link row by id, for `/adminstartgame`
    pub async fn find_group(&self, admin_chat_id: i64, id: i64) -> Result<Option<AdminGroup>> {
        self.admin_groups.find_by_id(admin_chat_id, id).await
    }
}
