//! Name token tables and their ancestor search depths
//!
//! All tokens are lowercase and matched as substrings of lowercased node
//! names. Depths count the node itself as the first entry.

/// Deepest chain any rule looks at
pub const MAX_DEPTH: usize = 40;

pub const HARD_EXCLUDE_DEPTH: usize = 40;
pub const HARD_EXCLUDE: &[&str] = &[
    "cursor",
    "loadingscreen",
    "screenfade",
    "fadeoverlay",
    "videoplayer",
    "debugconsole",
];

/// User tokens from `exclude_tokens`
pub const USER_EXCLUDE_DEPTH: usize = 14;

pub const POPUP_DEPTH: usize = 18;
pub const POPUP: &[&str] = &[
    "tooltip",
    "popup",
    "hint",
    "inspect",
    "contextmenu",
    "dropdown",
    "modal",
    "infowindow",
];

pub const CHAT_DEPTH: usize = 18;
pub const CHAT: &[&str] = &[
    "chat",
    "combatlog",
    "eventlog",
    "messagelog",
    "history",
    "messages",
];

pub const HUD_GROUP_DEPTH: usize = 18;

pub const HUD_LEFT: &[&str] = &[
    "groups",
    "unitgroup",
    "grouppanel",
    "castbar",
    "leftbar",
    "leftpanel",
];

// No generic "bar" or "scroll": both appear all over inventory and journal screens
pub const HUD_ACTION_BAR: &[&str] = &[
    "actionbar",
    "abilitybar",
    "hotbar",
    "spellbar",
    "commandbar",
    "quickbar",
    "skillbar",
    "itembar",
];

pub const HUD_CENTER: &[&str] = &[
    "center",
    "mainpanel",
    "unitpanel",
    "partybar",
    "mainbar",
    "hudplate",
    "backplate",
    "uipanel",
];

pub const HUD_RIGHT: &[&str] = &[
    "sidebuttons",
    "rightbuttons",
    "utilitybuttons",
    "rightpanel",
    "hudright",
    "hudbuttons",
];

pub const HUD_DIALOGUE: &[&str] = &["dialog", "dialogue", "conversation", "textbox", "subtitle"];

pub const MAP_DEPTH: usize = 12;
pub const MAP: &[&str] = &["map", "minimap", "worldmap", "areamap", "localmap"];

/// Screens where HUD rules never apply
pub const NON_HUD_SCREEN_DEPTH: usize = 28;
pub const NON_HUD_SCREEN: &[&str] = &[
    "journal",
    "encyclopedia",
    "spellbook",
    "inventory",
    "character",
    "mythic",
    "map",
    "stash",
    "loot",
    "vendor",
    "trade",
];

pub const FRONT_END_DEPTH: usize = 32;
pub const FRONT_END: &[&str] = &[
    "mainmenu",
    "title",
    "frontend",
    "front_end",
    "credits",
    "license",
    "newgame",
    "loadgame",
    "settings",
    "options",
];

pub const PORTRAIT_DEPTH: usize = 20;
pub const PORTRAIT: &[&str] = &[
    "portrait",
    "avatar",
    "charactericon",
    "partyicon",
    "unitframe",
];

pub const JOURNAL_DEPTH: usize = 28;
pub const JOURNAL: &[&str] = &[
    "journal",
    "questjournal",
    "encyclopedia",
    "codex",
    "glossary",
    "lore",
];

/// Own-name hints that an unremarkable surface is a panel background
pub const BACKGROUND_HINT: &[&str] = &["bg", "background", "panel", "frame", "parchment", "paper"];

/// Own-chain hints that a world-space surface is a readable sheet
pub const SHEET_DEPTH: usize = 6;
pub const SHEET: &[&str] = &[
    "paper", "sheet", "scroll", "page", "note", "letter", "window", "panel",
];

// HUD art filter (own name only)
pub const HUD_ART_KEEP: &[&str] = &[
    "bg",
    "background",
    "back",
    "paper",
    "parchment",
    "decor",
    "art",
];
pub const HUD_ART_SKIP: &[&str] = &["icon", "button", "slot", "ability", "spell", "skill"];

// Journal parchment filter (own name only); "parchment" + "bg" is checked separately
pub const JOURNAL_PARCHMENT: &[&str] = &[
    "background",
    "parchment_bg",
    "paper_bg",
    "journal_bg",
    "encyclopedia_bg",
];

// Text contexts
pub const SPELL_CONTEXT_DEPTH: usize = 18;
pub const SPELL_CONTEXT: &[&str] = &["spell", "ability", "spellbook", "tooltip", "inspect"];

pub const SPELL_NAME_DEPTH: usize = 10;
pub const SPELL_NAME: &[&str] = &["spellname", "abilityname", "name", "title", "header"];

pub const SPELL_BODY_DEPTH: usize = 8;
pub const SPELL_BODY: &[&str] = &["description", "desc", "body", "text"];

pub const LORE_DEPTH: usize = 40;
pub const LORE: &[&str] = &[
    "journal",
    "quest",
    "encyclopedia",
    "codex",
    "glossary",
    "lore",
    "terms",
    "tutorial",
    "page",
    "entry",
    "article",
    "book",
];
