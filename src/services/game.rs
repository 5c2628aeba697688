//! Game service implementation
//!
//! Owns the roster state machine: announcement, attend/maybe/decline
//! transitions, the guest lifecycle and the admin confirm/unconfirm flows.
//! Capacity is display-only; nothing here rejects a sign-up over the limit.

use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ThreadId};
use tracing::{error, info, warn};

use crate::database::repositories::{
    GamePlayerRepository, GameRepository, JokeRepository, UserRepository,
};
use crate::i18n::declension::{capitalize_first, decline_az, decline_ru, AzCase, RuCase};
use crate::i18n::messages;
use crate::models::game::{CreateGameRequest, Game, GamePlayerDetails};
use crate::models::joke::JokeType;
use crate::services::messenger::BotMessenger;
use crate::utils::errors::{Result, VolleyBuddyError};
use crate::utils::format::{
    places_left, render_roster_lines, sort_roster, tag_players_by_commas, tag_users_by_commas,
};

/// Result of pressing the attend button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendOutcome {
    /// The game is closed, no row was touched
    Closed,
    /// Upserted; carries the game label for the confirmation text
    Joined(String),
    /// The payload pointed at a game that does not exist
    GameMissing,
}

/// Result of pressing the decline button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclineOutcome {
    /// A row existed and was deleted; carries label and farewell joke
    Left { label: String, joke: String },
    /// The presser never was in the game
    NotInGame,
}

#[derive(Clone)]
pub struct GameService {
    games: GameRepository,
    game_players: GamePlayerRepository,
    users: UserRepository,
    jokes: JokeRepository,
    messenger: BotMessenger,
}

impl GameService {
    pub fn new(
        games: GameRepository,
        game_players: GamePlayerRepository,
        users: UserRepository,
        jokes: JokeRepository,
        messenger: BotMessenger,
    ) -> Self {
        Self { games, game_players, users, jokes, messenger }
    }

    // ----- attendance transitions (driven by the callback router) -----

    /// "Attend" press: rejected on closed games, otherwise upserts the row
    /// as confirmed.
    pub async fn attend(&self, game_id: i64, chat_id: i64, telegram_user_id: i64) -> Result<AttendOutcome> {
        if !self.games.check_game_status(game_id).await? {
            return Ok(AttendOutcome::Closed);
        }

        match self
            .game_players
            .upsert_attendance(game_id, chat_id, telegram_user_id, true)
            .await?
        {
            Some(label) => Ok(AttendOutcome::Joined(label)),
            None => Ok(AttendOutcome::GameMissing),
        }
    }

    /// "Maybe" press: upserts the row as unconfirmed. Deliberately skips
    /// the game-open check the attend path performs.
    pub async fn maybe(&self, game_id: i64, chat_id: i64, telegram_user_id: i64) -> Result<Option<String>> {
        self.game_players
            .upsert_attendance(game_id, chat_id, telegram_user_id, false)
            .await
    }

    /// "Decline" press: deletes the row if present. Only an actual removal
    /// earns the farewell joke.
    pub async fn decline(&self, game_id: i64, chat_id: i64, telegram_user_id: i64) -> Result<DeclineOutcome> {
        match self
            .game_players
            .remove_player(game_id, telegram_user_id, chat_id)
            .await?
        {
            Some(label) => {
                let joke = self
                    .jokes
                    .random_joke(JokeType::LeftGame)
                    .await?
                    .unwrap_or_default();
                Ok(DeclineOutcome::Left { label, joke })
            }
            None => Ok(DeclineOutcome::NotInGame),
        }
    }

    /// Soft-close one game by id, returning its label
    pub async fn deactivate_by_id(&self, game_id: i64) -> Result<Option<String>> {
        self.games.deactivate_game(game_id).await
    }

    /// Flip one "maybe" row to confirmed
    pub async fn confirm_player(&self, game_id: i64, user_db_id: i64) -> Result<bool> {
        self.game_players.set_attendance(game_id, user_db_id, true).await
    }

    /// Flip one confirmed row back to "maybe"
    pub async fn unconfirm_player(&self, game_id: i64, user_db_id: i64) -> Result<bool> {
        self.game_players.set_attendance(game_id, user_db_id, false).await
    }

    /// Compound-delete a guest from its game. Non-guests are untouched.
    /// Success carries the delete-player joke for the confirmation text.
    pub async fn delete_guest(&self, game_id: i64, user_db_id: i64) -> Result<Option<String>> {
        if !self.game_players.delete_guest(game_id, user_db_id).await? {
            return Ok(None);
        }
        let joke = self
            .jokes
            .random_joke(JokeType::DeletePlayer)
            .await?
            .unwrap_or_default();
        Ok(Some(joke))
    }

    /// Active games of a chat (used by the cross-group admin menu)
    pub async fn active_games(&self, chat_id: i64) -> Result<Vec<Game>> {
        self.games.get_games(chat_id).await
    }

    // ----- command-driven flows -----

    /// Announce a game: upsert on the natural key, post the public
    /// announcement with action buttons and fan the private copies out to
    /// every registered member, one by one.
    pub async fn create_game(&self, chat_id: ChatId, request: &CreateGameRequest, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_create_game(chat_id, request, thread_id).await {
            error!(chat_id = chat_id.0, error = %e, "Game creation failed");
            if let Err(e) = self
                .messenger
                .send_text(chat_id, messages::GAME_NOT_CREATED, thread_id)
                .await
            {
                error!(chat_id = chat_id.0, error = %e, "Failed to send apology");
            }
        }
    }

    async fn try_create_game(
        &self,
        chat_id: ChatId,
        request: &CreateGameRequest,
        thread_id: Option<ThreadId>,
    ) -> Result<()> {
        let users = self.users.get_users(chat_id.0).await?;
        if users.is_empty() {
            self.messenger
                .send_text(chat_id, messages::NO_PLAYERS_FOR_GAME, thread_id)
                .await?;
            return Ok(());
        }

        let game_id = self.games.add_game(chat_id.0, request).await?;
        info!(chat_id = chat_id.0, game_id, label = %request.label, "Game announced");

        let day_az = capitalize_first(&decline_az(&request.label, AzCase::Dative));
        let day_ru = decline_ru(&request.label, RuCase::Accusative);
        let header = format!(
            "📢 {day_az} oyun elan edildi!\n📢 Объявлена игра на {day_ru}!\n\
             🗓 Tarix / Дата: {}\n⏳ Vaxt / Время: {} — {}.\n📍 Məkan / Место: {}",
            request.date.format("%d.%m.%Y"),
            request.start.format("%H:%M"),
            request.end.format("%H:%M"),
            request.place,
        );

        let keyboard = InlineKeyboardMarkup::new(vec![
            vec![InlineKeyboardButton::callback(
                "Oyuna yazılmaq / Записаться на игру",
                format!("appointment_{game_id}"),
            )],
            vec![InlineKeyboardButton::callback(
                "Dəqiq deyil / Не точно",
                format!("notconfirmed_{game_id}"),
            )],
            vec![InlineKeyboardButton::callback(
                "İmtina etmək / Отказаться от игры",
                format!("decline_{game_id}"),
            )],
        ]);

        let announcement = format!("{header}\n\n{}", tag_users_by_commas(&users));
        self.messenger
            .send_html_with_keyboard(chat_id, announcement, keyboard, thread_id)
            .await?;

        // Per-recipient failures must not abort the rest of the fan-out
        let mut delivered = 0usize;
        for user in &users {
            let private_keyboard = InlineKeyboardMarkup::new(vec![
                vec![InlineKeyboardButton::callback(
                    "Oyuna yazılmaq / Записаться",
                    format!("privateAppointment_{}_{game_id}", chat_id.0),
                )],
                vec![InlineKeyboardButton::callback(
                    "Dəqiq deyil / Не точно",
                    format!("privateNotconfirmed_{}_{game_id}", chat_id.0),
                )],
                vec![InlineKeyboardButton::callback(
                    "İmtina etmək / Отказаться",
                    format!("privateDecline_{}_{game_id}", chat_id.0),
                )],
            ]);

            if self
                .messenger
                .send_private_with_keyboard(user.user_id, &header, private_keyboard)
                .await
            {
                delivered += 1;
            }
        }
        info!(game_id, delivered, total = users.len(), "Private announcements sent");

        Ok(())
    }

    /// List the chat's active games with sign-up buttons
    pub async fn show_games(&self, chat_id: ChatId, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_show_games(chat_id, thread_id).await {
            self.apologize(chat_id, thread_id, "show games", e).await;
        }
    }

    async fn try_show_games(&self, chat_id: ChatId, thread_id: Option<ThreadId>) -> Result<()> {
        let games = self.games.get_games(chat_id.0).await?;
        if games.is_empty() {
            self.messenger.send_text(chat_id, messages::NO_GAMES, thread_id).await?;
            return Ok(());
        }

        let rows: Vec<Vec<InlineKeyboardButton>> = games
            .iter()
            .map(|game| {
                let day = decline_ru(&game.label, RuCase::Accusative);
                vec![
                    InlineKeyboardButton::callback(format!("+ на {day}"), format!("appointment_{}", game.id)),
                    InlineKeyboardButton::callback(format!("+/- на {day}"), format!("notconfirmed_{}", game.id)),
                    InlineKeyboardButton::callback(format!("- на {day}"), format!("decline_{}", game.id)),
                ]
            })
            .collect();

        let blocks: Vec<String> = games
            .iter()
            .enumerate()
            .map(|(idx, game)| {
                format!(
                    "🏐 Oyun № {n} / Игра №{n}\n🗓 Tarix / Дата: {date} ({day_az} / {label})\n\
                     ⏳ Vaxt / Время: {start} — {end}\n📍 Məkan / Место: {place}",
                    n = idx + 1,
                    date = game.game_date.format("%d.%m.%Y"),
                    day_az = decline_az(&game.label, AzCase::Nominative),
                    label = game.label,
                    start = game.game_starts.format("%H:%M"),
                    end = game.game_ends.format("%H:%M"),
                    place = game.place,
                )
            })
            .collect();

        self.messenger
            .send_with_keyboard(
                chat_id,
                blocks.join("\n----------------------------------\n"),
                InlineKeyboardMarkup::new(rows),
                thread_id,
            )
            .await?;
        Ok(())
    }

    /// Answer "во сколько" with the start times of the active games
    pub async fn show_game_times(&self, chat_id: ChatId, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_show_game_times(chat_id, thread_id).await {
            self.apologize(chat_id, thread_id, "show game times", e).await;
        }
    }

    async fn try_show_game_times(&self, chat_id: ChatId, thread_id: Option<ThreadId>) -> Result<()> {
        let times = self.games.get_game_times(chat_id.0).await?;
        if times.is_empty() {
            self.messenger.send_text(chat_id, messages::NO_GAMES, thread_id).await?;
            return Ok(());
        }

        let lines: Vec<String> = times
            .iter()
            .map(|(start, label)| {
                format!(
                    "Игра на {} начинается в {}",
                    decline_ru(label, RuCase::Accusative),
                    start.format("%H:%M")
                )
            })
            .collect();

        self.messenger.send_text(chat_id, lines.join("\n"), thread_id).await?;
        Ok(())
    }

    /// Full roster view: one block per game, confirmed players first, the
    /// wait-list separator at the capacity index.
    pub async fn show_game_players(&self, chat_id: ChatId, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_show_game_players(chat_id, thread_id).await {
            self.apologize(chat_id, thread_id, "show game players", e).await;
        }
    }

    async fn try_show_game_players(&self, chat_id: ChatId, thread_id: Option<ThreadId>) -> Result<()> {
        let players = self.game_players.get_game_players(chat_id.0).await?;
        if players.is_empty() {
            self.messenger.send_text(chat_id, messages::NO_PLAYERS, thread_id).await?;
            return Ok(());
        }

        let mut blocks = Vec::new();
        for group in group_by_game(players) {
            let first = &group[0];
            let label = first.label.clone();
            let users_limit = first.users_limit;
            let game_date = first.game_date;
            let game_starts = first.game_starts;
            let game_ends = first.game_ends;
            let place = first.place.clone();

            let mut roster = group;
            sort_roster(&mut roster);

            blocks.push(format!(
                "{day_az} oyunu\nИгра на {day_ru}\n🗓 Tarix / Дата: {date}\n\
                 ⏳ Vaxt / Время: {start} - {end}\n📍 Məkan / Место: {place}\n\n\
                 👤 İştirakçılar / Участники:\n{roster}\n\n\
                 ⚠️ Qalan yer sayı / Осталось мест: {left}",
                day_az = capitalize_first(&decline_az(&label, AzCase::Nominative)),
                day_ru = decline_ru(&label, RuCase::Accusative),
                date = game_date.format("%d.%m.%Y"),
                start = game_starts.format("%H:%M"),
                end = game_ends.format("%H:%M"),
                roster = render_roster_lines(&roster, users_limit),
                left = places_left(users_limit, roster.len()),
            ));
        }

        self.messenger
            .send_text(chat_id, blocks.join("\n\n🔸🔸🔸🔸🔸🔸🔸🔸🔸🔸🔸\n\n"), thread_id)
            .await?;
        Ok(())
    }

    /// Compose the message tagging everyone signed up for any active game
    pub async fn tag_game_players(&self, chat_id: i64, is_admin: bool) -> String {
        if !is_admin {
            let joke = self
                .jokes
                .random_joke(JokeType::TagRegistered)
                .await
                .ok()
                .flatten()
                .unwrap_or_default();
            return format!("Только одмэн может тегать игроков! {joke}").trim_end().to_string();
        }

        match self.game_players.get_game_players(chat_id).await {
            Ok(players) if players.is_empty() => {
                "Нет записавшихся на игру. Тревожить некого.".to_string()
            }
            Ok(players) => format!(
                "{}, у одмэна к вам дело, ща напишет. Не перебивайте!",
                tag_players_by_commas(&players)
            ),
            Err(e) => {
                warn!(chat_id, error = %e, "Failed to tag game players");
                messages::ERROR_OCCURRED.to_string()
            }
        }
    }

    /// Ping the players still sitting on "maybe"
    pub async fn tag_undecided_players(&self, chat_id: ChatId, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_tag_undecided_players(chat_id, thread_id).await {
            self.apologize(chat_id, thread_id, "tag undecided", e).await;
        }
    }

    async fn try_tag_undecided_players(&self, chat_id: ChatId, thread_id: Option<ThreadId>) -> Result<()> {
        let players = self.game_players.get_undecided_players(chat_id.0).await?;
        if players.is_empty() {
            self.messenger
                .send_text(chat_id, "Неопределившихся нет. Все молодцы! 👏", thread_id)
                .await?;
            return Ok(());
        }

        let joke = self
            .jokes
            .random_joke(JokeType::TagUndecided)
            .await?
            .unwrap_or_default();
        let text = format!(
            "{}, пора определяться! {joke}",
            tag_players_by_commas(&players)
        )
        .trim_end()
        .to_string();
        self.messenger.send_html(chat_id, text, thread_id).await?;
        Ok(())
    }

    /// Offer the active games for closing, one button per game
    pub async fn deactivate_games(&self, chat_id: ChatId, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_deactivate_games(chat_id, thread_id).await {
            self.apologize(chat_id, thread_id, "deactivate games", e).await;
        }
    }

    async fn try_deactivate_games(&self, chat_id: ChatId, thread_id: Option<ThreadId>) -> Result<()> {
        let games = self.games.get_games(chat_id.0).await?;
        if games.is_empty() {
            self.messenger
                .send_text(chat_id, messages::NO_GAMES_TO_DEACTIVATE, thread_id)
                .await?;
            return Ok(());
        }

        let blocks: Vec<String> = games
            .iter()
            .enumerate()
            .map(|(idx, game)| {
                format!(
                    "Игра №{}\n    Дата: {} ({})\n",
                    idx + 1,
                    game.game_date.format("%d.%m.%Y"),
                    game.label
                )
            })
            .collect();

        let rows: Vec<Vec<InlineKeyboardButton>> = games
            .iter()
            .map(|game| {
                vec![InlineKeyboardButton::callback(
                    format!("Закрыть игру на {}", decline_ru(&game.label, RuCase::Accusative)),
                    format!("deactivegame_{}", game.id),
                )]
            })
            .collect();

        self.messenger
            .send_with_keyboard(
                chat_id,
                blocks.join("\n----------------------------------\n"),
                InlineKeyboardMarkup::new(rows),
                thread_id,
            )
            .await?;
        Ok(())
    }

    /// Reopen the most recently closed game
    pub async fn activate_game(&self, chat_id: ChatId, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_activate_game(chat_id, thread_id).await {
            self.apologize(chat_id, thread_id, "activate game", e).await;
        }
    }

    async fn try_activate_game(&self, chat_id: ChatId, thread_id: Option<ThreadId>) -> Result<()> {
        match self.games.activate_last_closed(chat_id.0).await? {
            Some(label) => {
                let text = format!(
                    "Игра на {} снова открыта! Налетай!",
                    decline_ru(&label, RuCase::Accusative)
                );
                self.messenger.send_text(chat_id, text, thread_id).await?;
            }
            None => {
                self.messenger
                    .send_text(chat_id, messages::NO_GAMES_TO_ACTIVATE, thread_id)
                    .await?;
            }
        }
        Ok(())
    }

    /// Change the advisory capacity of a labelled game
    pub async fn change_game_limit(&self, chat_id: ChatId, label: &str, limit: i32, thread_id: Option<ThreadId>) {
        if let Err(e) = self.try_change_game_limit(chat_id, label, limit, thread_id).await {
            self.apologize(chat_id, thread_id, "change limit", e).await;
        }
    }

    async fn try_change_game_limit(
        &self,
        chat_id: ChatId,
        label: &str,
        limit: i32,
        thread_id: Option<ThreadId>,
    ) -> Result<()> {
        match self.games.change_limit(chat_id.0, label, limit).await? {
            Some(label) => {
                info!(chat_id = chat_id.0, %label, limit, "Game limit changed");
                let text = format!(
                    "Изменено количество игроков на игру на {}: теперь {limit}",
                    decline_ru(&label, RuCase::Accusative)
                );
                self.messenger.send_text(chat_id, text, thread_id).await?;
            }
            None => {
                self.messenger.send_text(chat_id, messages::GAME_NOT_FOUND, thread_id).await?;
            }
        }
        Ok(())
    }

    /// Attach a disposable guest to a labelled game
    pub async fn add_guest_to_game(
        &self,
        chat_id: ChatId,
        label: &str,
        fullname: &str,
        confirmed: bool,
        thread_id: Option<ThreadId>,
    ) {
        if let Err(e) = self
            .try_add_guest_to_game(chat_id, label, fullname, confirmed, thread_id)
            .await
        {
            self.apologize(chat_id, thread_id, "add guest", e).await;
        }
    }

    async fn try_add_guest_to_game(
        &self,
        chat_id: ChatId,
        label: &str,
        fullname: &str,
        confirmed: bool,
        thread_id: Option<ThreadId>,
    ) -> Result<()> {
        let Some(game) = self.games.find_active_by_label(chat_id.0, label).await? else {
            self.messenger.send_text(chat_id, messages::GAME_NOT_FOUND, thread_id).await?;
            return Ok(());
        };

        // First whitespace run splits first name from the rest
        let mut words = fullname.split_whitespace();
        let first_name = words.next().unwrap_or(fullname);
        let last_name = words.collect::<Vec<_>>().join(" ");

        let guest_id = self.users.add_guest(chat_id.0, first_name, &last_name).await?;
        self.game_players.insert_attendance(guest_id, game.id, confirmed).await?;
        info!(chat_id = chat_id.0, game_id = game.id, guest_id, "Guest added");

        let joke = self
            .jokes
            .random_joke(JokeType::AddGuest)
            .await?
            .unwrap_or_default();
        let maybe_suffix = if confirmed { "" } else { " Но это не точно 😒" };
        let text = format!(
            "Гость {fullname} записан на {}!{maybe_suffix} {joke}",
            decline_ru(&game.label, RuCase::Accusative)
        )
        .trim_end()
        .to_string();
        self.messenger.send_text(chat_id, text, thread_id).await?;
        Ok(())
    }

    /// Render the "maybe" players of a game as one button each; pressing a
    /// button confirms exactly that player.
    pub async fn show_undecided_for_confirmation(&self, chat_id: ChatId, label: &str, thread_id: Option<ThreadId>) {
        if let Err(e) = self
            .try_selection_list(
                chat_id,
                label,
                thread_id,
                SelectionList::Confirm,
            )
            .await
        {
            self.apologize(chat_id, thread_id, "confirm list", e).await;
        }
    }

    /// Render the confirmed players as buttons; pressing one flips the row
    /// back to "maybe".
    pub async fn show_confirmed_for_unconfirmation(&self, chat_id: ChatId, label: &str, thread_id: Option<ThreadId>) {
        if let Err(e) = self
            .try_selection_list(
                chat_id,
                label,
                thread_id,
                SelectionList::Unconfirm,
            )
            .await
        {
            self.apologize(chat_id, thread_id, "unconfirm list", e).await;
        }
    }

    /// Render the game's guests as buttons; pressing one deletes the guest
    /// and its user row.
    pub async fn show_guests_for_deletion(&self, chat_id: ChatId, label: &str, thread_id: Option<ThreadId>) {
        if let Err(e) = self
            .try_selection_list(
                chat_id,
                label,
                thread_id,
                SelectionList::DeleteGuest,
            )
            .await
        {
            self.apologize(chat_id, thread_id, "delete guest list", e).await;
        }
    }

    async fn try_selection_list(
        &self,
        chat_id: ChatId,
        label: &str,
        thread_id: Option<ThreadId>,
        kind: SelectionList,
    ) -> Result<()> {
        let players = match kind {
            SelectionList::Confirm => self.game_players.get_undecided_by_label(chat_id.0, label).await?,
            SelectionList::Unconfirm => self.game_players.get_confirmed_by_label(chat_id.0, label).await?,
            SelectionList::DeleteGuest => self.game_players.get_guests_by_label(chat_id.0, label).await?,
        };

        let day = decline_ru(label, RuCase::Accusative);
        if players.is_empty() {
            let text = match kind {
                SelectionList::Confirm => format!("Некого подтверждать на {day}"),
                SelectionList::Unconfirm => format!("Некого разжаловать на {day}"),
                SelectionList::DeleteGuest => format!("Гостей на {day} нет"),
            };
            self.messenger.send_text(chat_id, text, thread_id).await?;
            return Ok(());
        }

        let rows: Vec<Vec<InlineKeyboardButton>> = players
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let last_name = p.last_name.as_deref().unwrap_or_default();
                let title = format!("{}. {} {}", idx + 1, p.first_name, last_name)
                    .trim_end()
                    .to_string();
                vec![InlineKeyboardButton::callback(
                    title,
                    format!("{}_{}_{}", kind.payload_prefix(), p.game_id, p.user_db_id),
                )]
            })
            .collect();

        let prompt = match kind {
            SelectionList::Confirm => format!("Кого подтверждаем на {day}?"),
            SelectionList::Unconfirm => format!("Кого разжалуем на {day}?"),
            SelectionList::DeleteGuest => format!("Какого гостя удаляем с игры на {day}?"),
        };
        self.messenger
            .send_with_keyboard(chat_id, prompt, InlineKeyboardMarkup::new(rows), thread_id)
            .await?;
        Ok(())
    }

    async fn apologize(&self, chat_id: ChatId, thread_id: Option<ThreadId>, operation: &str, err: VolleyBuddyError) {
        error!(chat_id = chat_id.0, operation, error = %err, "Game operation failed");
        if let Err(e) = self
            .messenger
            .send_text(chat_id, messages::ERROR_OCCURRED, thread_id)
            .await
        {
            error!(chat_id = chat_id.0, error = %e, "Failed to send apology");
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SelectionList {
    Confirm,
    Unconfirm,
    DeleteGuest,
}

impl SelectionList {
    fn payload_prefix(self) -> &'static str {
        match self {
            SelectionList::Confirm => "confirmplayer",
            SelectionList::Unconfirm => "unconfirmplayer",
            SelectionList::DeleteGuest => "deleteguest",
        }
    }
}

/// Group roster rows by game, preserving the query order of both games
/// and players.
fn group_by_game(players: Vec<GamePlayerDetails>) -> Vec<Vec<GamePlayerDetails>> {
    let mut order: Vec<i64> = Vec::new();
    let mut groups: std::collections::HashMap<i64, Vec<GamePlayerDetails>> = std::collections::HashMap::new();

    for player in players {
        if !groups.contains_key(&player.game_id) {
            order.push(player.game_id);
        }
        groups.entry(player.game_id).or_default().push(player);
    }

    order
        .into_iter()
        .filter_map(|game_id| groups.remove(&game_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn row(game_id: i64, name: &str) -> GamePlayerDetails {
        GamePlayerDetails {
            game_id,
            user_db_id: 1,
            telegram_user_id: 1,
            first_name: name.to_string(),
            last_name: None,
            username: None,
            confirmed_attendance: true,
            is_guest: false,
            game_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            game_starts: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            game_ends: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            place: "Зал".to_string(),
            label: "среда".to_string(),
            users_limit: 10,
        }
    }

    #[test]
    fn grouping_preserves_game_and_player_order() {
        let rows = vec![row(2, "a"), row(2, "b"), row(5, "c"), row(2, "d")];
        let groups = group_by_game(rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].iter().map(|p| p.first_name.as_str()).collect::<Vec<_>>(), ["a", "b", "d"]);
        assert_eq!(groups[1][0].first_name, "c");
    }

    #[test]
    fn selection_prefixes_are_distinct() {
        assert_eq!(SelectionList::Confirm.payload_prefix(), "confirmplayer");
        assert_eq!(SelectionList::Unconfirm.payload_prefix(), "unconfirmplayer");
        assert_eq!(SelectionList::DeleteGuest.payload_prefix(), "deleteguest");
    }
}
