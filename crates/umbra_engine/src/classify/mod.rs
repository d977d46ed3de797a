//! Name and geometry classification
//!
//! Decides what a visual node *is* from the names along its ancestor chain,
//! the component tags on that chain, and its size. The decision is an ordered
//! rule table: the first rule that returns a role wins, so ties resolve by
//! table order and never by how deep in the chain a token was found.
//!
//! ```text
//! exclude → tag sniff → popup → chat → HUD groups → portrait → journal → geometry
//! ```
//!
//! World-space roots get one more gate on top of the table so small overhead
//! elements (nameplates, floating markers) stay untouched.

pub mod tokens;

use std::fmt;

use smallvec::SmallVec;
use umbra_core::{node_path, Ancestors, ComponentTags, NodeId, NodeKind, RenderSpace, Size, UiHost};
use umbra_theme::Thresholds;

/// HUD chrome sub-groups, in classification order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HudGroup {
    /// Cast bars and unit groups on the left edge
    Left,
    ActionBar,
    /// Center plate (portraits excluded)
    Center,
    /// Utility buttons on the right edge
    Right,
    Dialogue,
}

impl HudGroup {
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "HUD_LEFT",
            Self::ActionBar => "HUD_ACTION_BAR",
            Self::Center => "HUD_CENTER",
            Self::Right => "HUD_RIGHT",
            Self::Dialogue => "HUD_DIALOGUE",
        }
    }
}

/// What a node is, as far as re-theming is concerned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Popup,
    Chat,
    HudGroup(HudGroup),
    Portrait,
    JournalLike,
    /// Never touched, whatever else matches
    Excluded,
    Untouched,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::Background => "BACKGROUND",
            Self::Popup => "POPUP",
            Self::Chat => "CHAT",
            Self::HudGroup(group) => group.label(),
            Self::Portrait => "PORTRAIT",
            Self::JournalLike => "JOURNAL",
            Self::Excluded => "EXCLUDED",
            Self::Untouched => "UNTOUCHED",
        }
    }

    /// Roles whose color is blended toward a tint target
    pub fn is_tintable(self) -> bool {
        matches!(
            self,
            Self::Background | Self::Popup | Self::Chat | Self::JournalLike
        )
    }

    /// Roles an image or surface can be a candidate for
    pub fn is_surface_candidate(self) -> bool {
        self.is_tintable() || matches!(self, Self::HudGroup(_))
    }

    /// Roles the interception hook never rewrites
    pub fn passes_through(self) -> bool {
        matches!(self, Self::Excluded | Self::Untouched | Self::Portrait)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything classification needs about one node, gathered once
#[derive(Clone, Debug)]
pub struct NodeFacts {
    pub kind: NodeKind,
    /// Lowercased names, the node itself first; unnamed nodes are empty strings
    pub names: SmallVec<[String; 16]>,
    /// Union of tags over the gathered chain
    pub tags: ComponentTags,
    pub size: Size,
    pub space: RenderSpace,
}

impl NodeFacts {
    /// Gather node facts from the host; `None` if the node is gone
    pub fn gather<H: UiHost + ?Sized>(host: &H, node: NodeId) -> Option<NodeFacts> {
        if !host.is_alive(node) {
            return None;
        }
        let kind = host.kind(node)?;

        let mut names = SmallVec::new();
        let mut tags = ComponentTags::NONE;
        for id in Ancestors::new(host, node, tokens::MAX_DEPTH) {
            names.push(host.name(id).map(str::to_lowercase).unwrap_or_default());
            tags = tags.union(host.tags(id));
        }

        let space = host
            .root_of(node)
            .and_then(|root| host.render_space(root))
            .unwrap_or_default();

        Some(NodeFacts {
            kind,
            names,
            tags,
            size: host.size(node).unwrap_or(Size::ZERO),
            space,
        })
    }

    /// Build node facts by hand, node name first
    pub fn from_parts(
        kind: NodeKind,
        names: &[&str],
        tags: ComponentTags,
        size: Size,
        space: RenderSpace,
    ) -> NodeFacts {
        NodeFacts {
            kind,
            names: names.iter().map(|n| n.to_lowercase()).collect(),
            tags,
            size,
            space,
        }
    }

    pub fn own_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }

    /// Whether any name within `max_depth` contains any of `needles`
    pub fn name_has_any<S: AsRef<str>>(&self, max_depth: usize, needles: &[S]) -> bool {
        self.names
            .iter()
            .take(max_depth)
            .filter(|name| !name.is_empty())
            .any(|name| needles.iter().any(|n| name.contains(n.as_ref())))
    }

    pub fn is_small_icon(&self, thresholds: &Thresholds) -> bool {
        self.size.fits_within(thresholds.small_icon_max)
    }

    fn in_non_hud_screen(&self) -> bool {
        self.name_has_any(tokens::NON_HUD_SCREEN_DEPTH, tokens::NON_HUD_SCREEN)
            || self.name_has_any(tokens::FRONT_END_DEPTH, tokens::FRONT_END)
    }

    fn is_portrait_like(&self) -> bool {
        self.name_has_any(tokens::PORTRAIT_DEPTH, tokens::PORTRAIT)
    }
}

/// Settings classification depends on
#[derive(Clone, Copy, Debug)]
pub struct ClassifyContext<'a> {
    /// Parsed user exclude tokens
    pub exclude_tokens: &'a [String],
    pub thresholds: &'a Thresholds,
}

type Rule = fn(&NodeFacts, &ClassifyContext<'_>) -> Option<Role>;

/// Ordered rule table; the first `Some` wins
const RULES: &[(&str, Rule)] = &[
    ("exclude", rule_exclude),
    ("tag_sniff", rule_tag_sniff),
    ("popup", rule_popup),
    ("chat", rule_chat),
    ("hud_group", rule_hud_group),
    ("portrait", rule_portrait),
    ("journal", rule_journal),
    ("geometry", rule_geometry),
];

/// Classify an inspected node. Pure and deterministic.
pub fn classify(facts: &NodeFacts, ctx: &ClassifyContext<'_>) -> Role {
    let role = RULES
        .iter()
        .find_map(|(_, rule)| rule(facts, ctx))
        .unwrap_or(Role::Untouched);
    world_gate(facts, ctx, role)
}

/// Name of the rule that decides `facts`, for diagnostics
pub fn deciding_rule(facts: &NodeFacts, ctx: &ClassifyContext<'_>) -> &'static str {
    RULES
        .iter()
        .find(|(_, rule)| rule(facts, ctx).is_some())
        .map(|(name, _)| *name)
        .unwrap_or("none")
}

fn rule_exclude(p: &NodeFacts, ctx: &ClassifyContext<'_>) -> Option<Role> {
    let hit = p.name_has_any(tokens::HARD_EXCLUDE_DEPTH, tokens::HARD_EXCLUDE)
        || p.name_has_any(tokens::USER_EXCLUDE_DEPTH, ctx.exclude_tokens);
    hit.then_some(Role::Excluded)
}

fn rule_tag_sniff(p: &NodeFacts, _: &ClassifyContext<'_>) -> Option<Role> {
    p.tags.is_popup_like().then_some(Role::Popup)
}

fn rule_popup(p: &NodeFacts, _: &ClassifyContext<'_>) -> Option<Role> {
    p.name_has_any(tokens::POPUP_DEPTH, tokens::POPUP)
        .then_some(Role::Popup)
}

fn rule_chat(p: &NodeFacts, _: &ClassifyContext<'_>) -> Option<Role> {
    p.name_has_any(tokens::CHAT_DEPTH, tokens::CHAT)
        .then_some(Role::Chat)
}

fn rule_hud_group(p: &NodeFacts, _: &ClassifyContext<'_>) -> Option<Role> {
    if p.in_non_hud_screen() {
        return None;
    }
    let depth = tokens::HUD_GROUP_DEPTH;
    let in_map = p.name_has_any(tokens::MAP_DEPTH, tokens::MAP);

    let group = if !in_map && p.name_has_any(depth, tokens::HUD_LEFT) {
        HudGroup::Left
    } else if !in_map && p.name_has_any(depth, tokens::HUD_ACTION_BAR) {
        HudGroup::ActionBar
    } else if !p.is_portrait_like() && p.name_has_any(depth, tokens::HUD_CENTER) {
        HudGroup::Center
    } else if p.name_has_any(depth, tokens::HUD_RIGHT) {
        HudGroup::Right
    } else if p.name_has_any(depth, tokens::HUD_DIALOGUE) {
        HudGroup::Dialogue
    } else {
        return None;
    };
    Some(Role::HudGroup(group))
}

fn rule_portrait(p: &NodeFacts, _: &ClassifyContext<'_>) -> Option<Role> {
    (!p.in_non_hud_screen() && p.is_portrait_like()).then_some(Role::Portrait)
}

fn rule_journal(p: &NodeFacts, _: &ClassifyContext<'_>) -> Option<Role> {
    p.name_has_any(tokens::JOURNAL_DEPTH, tokens::JOURNAL)
        .then_some(Role::JournalLike)
}

fn rule_geometry(p: &NodeFacts, ctx: &ClassifyContext<'_>) -> Option<Role> {
    match p.kind {
        // Generic UI text sits on generic panels
        NodeKind::Text => Some(Role::Background),
        NodeKind::Image | NodeKind::Surface => {
            let large = p.size.reaches(ctx.thresholds.background_min());
            let hinted = p.name_has_any(1, tokens::BACKGROUND_HINT)
                && !p.is_small_icon(ctx.thresholds);
            Some(if large || hinted {
                Role::Background
            } else {
                Role::Untouched
            })
        }
        NodeKind::Container => Some(Role::Untouched),
    }
}

fn world_gate(p: &NodeFacts, ctx: &ClassifyContext<'_>, role: Role) -> Role {
    if p.space != RenderSpace::World {
        return role;
    }
    match role {
        Role::Popup | Role::Chat | Role::Excluded => role,
        Role::Background | Role::JournalLike => {
            let large = p.size.reaches(ctx.thresholds.world_large());
            let sheet = p.size.reaches(ctx.thresholds.world_moderate())
                && (p.name_has_any(tokens::SHEET_DEPTH, tokens::SHEET) || p.tags.is_popup_like());
            if large || sheet {
                role
            } else {
                Role::Untouched
            }
        }
        _ => Role::Untouched,
    }
}

/// `{kind} => {ROLE} :: {path}`
pub fn debug_line<H: UiHost + ?Sized>(host: &H, node: NodeId, kind: NodeKind, role: Role) -> String {
    format!(
        "{} => {} :: {}",
        kind.label(),
        role,
        node_path(host, node, tokens::MAX_DEPTH)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(exclude: &'a [String], thresholds: &'a Thresholds) -> ClassifyContext<'a> {
        ClassifyContext {
            exclude_tokens: exclude,
            thresholds,
        }
    }

    fn image(names: &[&str], size: Size) -> NodeFacts {
        NodeFacts::from_parts(
            NodeKind::Image,
            names,
            ComponentTags::NONE,
            size,
            RenderSpace::Overlay,
        )
    }

    const BIG: Size = Size::new(400.0, 300.0);

    #[test]
    fn test_exclude_beats_popup() {
        let thresholds = Thresholds::default();
        let exclude = vec!["minimap".to_string()];
        let facts = image(&["Bg", "TooltipRoot", "MinimapOverlay", "HUD"], BIG);

        assert_eq!(classify(&facts, &ctx(&exclude, &thresholds)), Role::Excluded);
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::Popup);
    }

    #[test]
    fn test_hard_exclude_reaches_deep() {
        let thresholds = Thresholds::default();
        let mut names = vec!["Panel"; 30];
        names.push("CursorLayer");
        let facts = image(&names, BIG);
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::Excluded);
    }

    #[test]
    fn test_user_exclude_depth_is_limited() {
        let thresholds = Thresholds::default();
        let exclude = vec!["vault".to_string()];
        let mut names = vec!["Panel"; 20];
        names.push("Vault");
        let facts = image(&names, BIG);
        assert_eq!(classify(&facts, &ctx(&exclude, &thresholds)), Role::Background);
    }

    #[test]
    fn test_tag_sniff_without_names() {
        let thresholds = Thresholds::default();
        let facts = NodeFacts::from_parts(
            NodeKind::Image,
            &["Frame", "Root"],
            ComponentTags::from_bits(ComponentTags::INSPECTION),
            Size::new(20.0, 20.0),
            RenderSpace::Overlay,
        );
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::Popup);
        assert_eq!(deciding_rule(&facts, &ctx(&[], &thresholds)), "tag_sniff");
    }

    #[test]
    fn test_chat_before_hud_dialogue() {
        let thresholds = Thresholds::default();
        let chat = image(&["Bg", "ChatWindow", "HUD"], BIG);
        let dialogue = image(&["Bg", "DialoguePanel", "HUD"], BIG);

        assert_eq!(classify(&chat, &ctx(&[], &thresholds)), Role::Chat);
        assert_eq!(
            classify(&dialogue, &ctx(&[], &thresholds)),
            Role::HudGroup(HudGroup::Dialogue)
        );
    }

    #[test]
    fn test_hud_groups_in_order() {
        let thresholds = Thresholds::default();
        let c = ctx(&[], &thresholds);

        let cases = [
            (&["Bg", "CastBar", "HUD"][..], HudGroup::Left),
            (&["Slot", "ActionBar", "HUD"][..], HudGroup::ActionBar),
            (&["Plate", "CenterBlock", "HUD"][..], HudGroup::Center),
            (&["Btn", "SideButtons", "HUD"][..], HudGroup::Right),
        ];
        for (names, group) in cases {
            assert_eq!(
                classify(&image(names, BIG), &c),
                Role::HudGroup(group),
                "{names:?}"
            );
        }
    }

    #[test]
    fn test_hud_groups_skip_non_hud_screens() {
        let thresholds = Thresholds::default();
        let facts = image(&["Bg", "ActionBar", "InventoryScreen"], BIG);
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::Background);
    }

    #[test]
    fn test_left_group_blocked_inside_map() {
        let thresholds = Thresholds::default();
        let facts = image(&["Marker", "Groups", "MapLayer"], Size::new(30.0, 30.0));
        // "map" also counts as a non-HUD screen, so no HUD group applies
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::Untouched);
    }

    #[test]
    fn test_center_yields_to_portrait() {
        let thresholds = Thresholds::default();
        let facts = image(&["Face", "Portrait", "CenterPanel", "HUD"], BIG);
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::Portrait);
    }

    #[test]
    fn test_journal_like() {
        let thresholds = Thresholds::default();
        let facts = image(&["Page", "Content", "EncyclopediaWindow"], BIG);
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::JournalLike);
    }

    #[test]
    fn test_small_unnamed_image_is_untouched() {
        let thresholds = Thresholds::default();
        let facts = image(&["Image", "Root"], Size::new(24.0, 24.0));
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::Untouched);
    }

    #[test]
    fn test_background_hint_needs_more_than_icon_size() {
        let thresholds = Thresholds::default();
        let c = ctx(&[], &thresholds);
        assert_eq!(
            classify(&image(&["Frame", "Root"], Size::new(80.0, 40.0)), &c),
            Role::Background
        );
        assert_eq!(
            classify(&image(&["FrameIcon", "Root"], Size::new(32.0, 32.0)), &c),
            Role::Untouched
        );
    }

    #[test]
    fn test_text_falls_back_to_background() {
        let thresholds = Thresholds::default();
        let facts = NodeFacts::from_parts(
            NodeKind::Text,
            &["Label", "Root"],
            ComponentTags::NONE,
            Size::new(10.0, 10.0),
            RenderSpace::Overlay,
        );
        assert_eq!(classify(&facts, &ctx(&[], &thresholds)), Role::Background);
    }

    #[test]
    fn test_world_gate() {
        let thresholds = Thresholds::default();
        let c = ctx(&[], &thresholds);
        let world = |names: &[&str], size| {
            NodeFacts::from_parts(
                NodeKind::Image,
                names,
                ComponentTags::NONE,
                size,
                RenderSpace::World,
            )
        };

        // Nameplate-sized background is held back
        assert_eq!(classify(&world(&["Bg", "Nameplate"], BIG), &c), Role::Untouched);
        // Moderate sheet passes
        assert_eq!(
            classify(&world(&["Bg", "LetterSheet"], Size::new(400.0, 260.0)), &c),
            Role::Background
        );
        // Large anything passes
        assert_eq!(
            classify(&world(&["Bg", "Board"], Size::new(800.0, 500.0)), &c),
            Role::Background
        );
        // Popups are never gated
        assert_eq!(
            classify(&world(&["Bg", "Tooltip"], Size::new(50.0, 50.0)), &c),
            Role::Popup
        );
    }

    #[test]
    fn test_role_predicates() {
        assert!(Role::JournalLike.is_tintable());
        assert!(!Role::HudGroup(HudGroup::Left).is_tintable());
        assert!(Role::HudGroup(HudGroup::Left).is_surface_candidate());
        assert!(Role::Portrait.passes_through());
        assert_eq!(Role::HudGroup(HudGroup::ActionBar).to_string(), "HUD_ACTION_BAR");
    }
}
