//! Canned bilingual message texts
//!
//! Expected domain outcomes speak in character; infrastructure failures get
//! the one generic apology. That tone split is a product decision.

// Registration
pub const REGISTRATION_SUCCESS: &str =
    "✅ Siz uğurla sistemdə qeydiyyatdan keçdiniz / Вы успешно зарегистрировались в системе";
pub const USER_ALREADY_IN_GROUP: &str =
    "İstifadəçi artıq qrupda var / Пользователь уже существует в группе";
pub const USER_ADDED_TO_GROUP: &str =
    "✅ Siz uğurla qrupa əlavə edildiniz / Вы успешно добавлены в группу";

// Games
pub const NO_GAMES: &str = "Hələki oyun-zad yoxdur / А игр ещё нет 😓";
pub const NO_PLAYERS: &str =
    "Oyuna yazılan yoxdur. Dəhşət. \n Нет записавшихся на игру. Капец.";
pub const GAME_NOT_FOUND: &str = "Игры не найдено";
pub const NO_PLAYERS_FOR_GAME: &str =
    "Кажется у нас нет зарегистрированных игроков для игры :(";
pub const GAME_NOT_CREATED: &str = "Что-то пошло не так и игра не создалась";
pub const NO_GAMES_TO_DEACTIVATE: &str =
    "Ты не можешь деактивировать игру, если активных игр нет";
pub const NO_GAMES_TO_ACTIVATE: &str = "Нет закрытых игр, нечего активировать";

// Permissions
pub const ADMIN_ONLY: &str = "Только одмэн может выполнить эту команду. Be clever!";
pub const CREATOR_ONLY: &str =
    "Такую ответственную работу мы могли доверить только создателям бота!";
pub const NOT_GROUP_ADMIN: &str = "Дело пахнет жареным. Вряд-ли вы админ той группы";
pub const NOT_ADMIN_OF_SELECTED: &str = "Вы не администратор этой группы";

// Errors
pub const ERROR_OCCURRED: &str = "Произошла ошибка. Попробуйте позже.";
pub const INVALID_GAME_FORMAT: &str =
    "Формат: /startgame ДД.ММ.ГГГГ/ЧЧ:ММ/ЧЧ:ММ/лимит/место/день недели\n\
     Пример: /startgame 01.01.2025/18:00/20:00/12/Спортзал/понедельник";
pub const INVALID_LIMIT_FORMAT: &str =
    "Формат: /changelimit день недели/новый лимит\nПример: /changelimit понедельник/14";
pub const LIMIT_MUST_BE_NUMBER: &str = "Лимит должен быть числом";

// Other
pub const NO_REGISTERED_USERS: &str = "Нет зарегистрированных пользователей. Капец!";
pub const NO_LINKED_GROUPS: &str = "У вас нет подчинённых групп";
pub const CHOOSE_GROUP: &str = "Выберите группу, которая подчиняется вам";
pub const MENU_TITLE: &str = "Menyu / Меню:";
