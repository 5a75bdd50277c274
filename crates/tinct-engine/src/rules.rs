//! Declarative rule tables.
//!
//! Everything the resolver knows about the target theme schema lives here as
//! ordered slices of plain records. The resolver walks these tables; it never
//! special-cases individual keys in control flow.

use crate::color::TRANSPARENT;

/// Fills a style key with a role color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleMapping {
    pub key: &'static str,
    pub role: &'static str,
}

const fn role(key: &'static str, role: &'static str) -> RoleMapping {
    RoleMapping { key, role }
}

/// Where an alpha rule takes its base color from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaBase {
    /// A palette role, alpha stripped.
    Role(&'static str),
    /// A semantic name, resolved through palette overrides and defaults.
    Semantic(&'static str),
    /// A raw terminal color, composited with its own alpha key.
    Terminal(&'static str),
}

/// Composites a base color with a named alpha and writes it to style keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaRule {
    pub alpha_key: &'static str,
    pub base: AlphaBase,
    pub style_keys: &'static [&'static str],
    /// Overwrite concrete values even when they are an unrelated color.
    pub force: bool,
}

const fn alpha_role(
    alpha_key: &'static str,
    role: &'static str,
    style_keys: &'static [&'static str],
) -> AlphaRule {
    AlphaRule {
        alpha_key,
        base: AlphaBase::Role(role),
        style_keys,
        force: false,
    }
}

const fn alpha_semantic(
    alpha_key: &'static str,
    semantic: &'static str,
    style_keys: &'static [&'static str],
) -> AlphaRule {
    AlphaRule {
        alpha_key,
        base: AlphaBase::Semantic(semantic),
        style_keys,
        force: false,
    }
}

const fn alpha_terminal(alpha_key: &'static str, key: &'static [&'static str; 1]) -> AlphaRule {
    AlphaRule {
        alpha_key,
        base: AlphaBase::Terminal(key[0]),
        style_keys: key,
        force: true,
    }
}

pub const ROLE_MAPPINGS: &[RoleMapping] = &[
    role("background", "surface"),
    role("surface.background", "surface"),
    role("elevated_surface.background", "surface"),
    role("panel.overlay_background", "surface"),
    role("editor.background", "surface"),
    role("editor.gutter.background", "surface"),
    role("editor.subheader.background", "surface"),
    role("editor.active_line.background", "overlay"),
    role("editor.highlighted_line.background", "overlay"),
    role("editor.foreground", "text"),
    role("editor.line_number", "muted"),
    role("editor.active_line_number", "foam"),
    role("editor.invisible", "muted"),
    role("editor.indent_guide", "muted"),
    role("editor.indent_guide_active", "subtle"),
    role("editor.wrap_guide", "muted"),
    role("editor.active_wrap_guide", "muted"),
    role("editor.document_highlight.read_background", "foam"),
    role("editor.document_highlight.write_background", "muted"),
    role("editor.document_highlight.bracket_background", "iris"),
    role("editor.debugger_active_line.background", "rose"),
    role("drop_target.background", "text"),
    role("text", "text"),
    role("text.muted", "muted"),
    role("text.placeholder", "muted"),
    role("text.disabled", "subtle"),
    role("text.accent", "foam"),
    role("link_text.hover", "foam"),
    role("icon", "text"),
    role("icon.muted", "muted"),
    role("icon.placeholder", "muted"),
    role("icon.disabled", "subtle"),
    role("icon.accent", "foam"),
    role("border.variant", "foam"),
    role("border.focused", "foam"),
    role("border.selected", "iris"),
    role("border.disabled", "muted"),
    role("tab.active_background", "surface"),
    role("tab.active_foreground", "text"),
    role("tab.inactive_foreground", "muted"),
    role("status_bar.background", "surface"),
    role("title_bar.background", "surface"),
    role("title_bar.inactive_background", "surface"),
    role("status_bar.foreground", "text"),
    role("title_bar.foreground", "text"),
    role("element.active", "highlight_med"),
    role("element.selected", "highlight_med"),
    role("element.hover", "highlight_low"),
    role("element.disabled", "surface"),
    role("element.background", "surface"),
    role("ghost_element.active", "highlight_high"),
    role("ghost_element.selected", "highlight_high"),
    role("ghost_element.hover", "highlight_low"),
    role("ghost_element.disabled", "surface"),
    role("ghost_element.background", "surface"),
    role("minimap.thumb.background", "foam"),
    role("minimap.thumb.hover_background", "foam"),
    role("minimap.thumb.active_background", "foam"),
    role("pane.focused_border", "muted"),
    role("pane_group.border", "muted"),
    role("panel.focused_border", "muted"),
    role("panel.indent_guide", "muted"),
    role("panel.indent_guide_active", "subtle"),
    role("panel.indent_guide_hover", "foam"),
    role("scrollbar.thumb.background", "muted"),
    role("scrollbar.thumb.hover_background", "muted"),
    role("scrollbar.track.background", "surface"),
    role("scrollbar.track.border", "text"),
    role("search.match_background", "foam"),
    role("search.active_match_background", "rose"),
];

/// Keys that default to a fixed literal color.
pub const CONST_MAPPINGS: &[(&str, &str)] = &[
    ("border", TRANSPARENT),
    ("border.transparent", TRANSPARENT),
    ("tab.inactive_background", TRANSPARENT),
    ("tab_bar.background", TRANSPARENT),
];

/// Keys that default to an explicit JSON `null` ("use the host default").
pub const NULL_KEYS: &[&str] = &[
    "minimap.thumb.border",
    "scrollbar.thumb.active_background",
    "scrollbar.thumb.border",
];

/// Built-in semantic name to role assignments.
pub const SEMANTIC_DEFAULTS: &[(&str, &str)] = &[
    ("error", "love"),
    ("warning", "gold"),
    ("info", "foam"),
    ("success", "pine"),
    ("conflict", "rose"),
    ("created", "foam"),
    ("deleted", "love"),
    ("modified", "gold"),
    ("renamed", "iris"),
    ("hidden", "muted"),
    ("hint", "subtle"),
    ("ignored", "muted"),
    ("unreachable", "muted"),
    ("predictive", "muted"),
];

/// Style keys filled from the first resolvable semantic name in the list.
pub const SEMANTIC_STYLE_KEYS: &[(&str, &[&str])] = &[
    ("version_control.added", &["created"]),
    ("version_control.deleted", &["deleted"]),
    ("version_control.modified", &["modified"]),
    ("version_control.renamed", &["renamed"]),
    ("version_control.conflict", &["modified", "conflict"]),
    ("version_control.ignored", &["ignored"]),
    ("version_control.conflict_marker.ours", &["warning"]),
    ("debugger.accent", &["error"]),
];

/// Role-derived style keys with no semantic indirection.
pub const EXTRA_ROLE_KEYS: &[RoleMapping] = &[role("version_control.conflict_marker.theirs", "foam")];

/// Roles used, in order, for the accent list when the palette has none.
pub const ACCENT_ROLES: &[&str] = &["foam", "iris", "pine", "rose", "gold", "love"];

pub const ALPHA_RULES: &[AlphaRule] = &[
    alpha_role("ui", "surface", &["background", "status_bar.background", "title_bar.background"]),
    alpha_role("ui_inactive", "surface", &["title_bar.inactive_background"]),
    alpha_role("surface", "surface", &["surface.background"]),
    alpha_role("elevated", "surface", &["elevated_surface.background"]),
    alpha_role("overlay", "surface", &["panel.overlay_background"]),
    alpha_role("subheader", "surface", &["editor.subheader.background"]),
    alpha_role("active_line", "overlay", &["editor.active_line.background"]),
    alpha_role("highlighted_line", "overlay", &["editor.highlighted_line.background"]),
    alpha_role("element_active", "highlight_med", &["element.active"]),
    alpha_role("element_selected", "highlight_med", &["element.selected"]),
    alpha_role("element_hover", "highlight_low", &["element.hover"]),
    alpha_role("element_disabled", "surface", &["element.disabled"]),
    alpha_role("ghost_active", "highlight_high", &["ghost_element.active"]),
    alpha_role("ghost_selected", "highlight_high", &["ghost_element.selected"]),
    alpha_role("ghost_hover", "highlight_low", &["ghost_element.hover"]),
    alpha_role("ghost_disabled", "surface", &["ghost_element.disabled"]),
    alpha_role("border_variant", "foam", &["border.variant"]),
    alpha_role("border_focused", "foam", &["border.focused"]),
    alpha_role("border_selected", "iris", &["border.selected"]),
    alpha_role("border_disabled", "muted", &["border.disabled"]),
    alpha_role("tab_active", "surface", &["tab.active_background"]),
    alpha_semantic("conflict_marker", "warning", &["version_control.conflict_marker.ours"]),
    alpha_role("conflict_marker", "foam", &["version_control.conflict_marker.theirs"]),
    alpha_role("panel_focus_border", "muted", &["panel.focused_border"]),
    alpha_role("panel_indent_guide", "muted", &["panel.indent_guide"]),
    alpha_role("panel_indent_guide_active", "subtle", &["panel.indent_guide_active"]),
    alpha_role("pane_focus_border", "muted", &["pane.focused_border"]),
    alpha_role("pane_group_border", "muted", &["pane_group.border"]),
    alpha_role("scrollbar_thumb", "muted", &["scrollbar.thumb.background"]),
    alpha_role("scrollbar_thumb_hover", "muted", &["scrollbar.thumb.hover_background"]),
    alpha_role("scrollbar_track", "surface", &["scrollbar.track.background"]),
    alpha_role("scrollbar_track_border", "text", &["scrollbar.track.border"]),
    alpha_role("search_match", "foam", &["search.match_background"]),
    alpha_role("search_active", "rose", &["search.active_match_background"]),
    alpha_role("debugger_line", "rose", &["editor.debugger_active_line.background"]),
    alpha_role("indent_guide", "muted", &["editor.indent_guide"]),
    alpha_role("indent_guide_active", "subtle", &["editor.indent_guide_active"]),
    alpha_role("wrap_guide", "muted", &["editor.wrap_guide"]),
    alpha_role("active_wrap_guide", "muted", &["editor.active_wrap_guide"]),
    alpha_role("doc_highlight_read", "foam", &["editor.document_highlight.read_background"]),
    alpha_role("doc_highlight_write", "muted", &["editor.document_highlight.write_background"]),
    alpha_role("doc_highlight_bracket", "iris", &["editor.document_highlight.bracket_background"]),
    alpha_role("drop_target", "text", &["drop_target.background"]),
    alpha_role("minimap_bg", "foam", &["minimap.thumb.background"]),
    alpha_role("minimap_hover", "foam", &["minimap.thumb.hover_background"]),
    alpha_role("minimap_active", "foam", &["minimap.thumb.active_background"]),
    alpha_terminal("terminal_background", &["terminal.background"]),
    alpha_terminal("terminal_ansi_background", &["terminal.ansi.background"]),
];

/// Alpha key for the active tab when it falls back to the editor background.
pub const TAB_ACTIVE_ALPHA: &str = "tab_active";

/// Alpha key for player selections.
pub const SELECTION_ALPHA: &str = "selection";

/// Selection alpha used when the table has none.
pub const DEFAULT_SELECTION_ALPHA: &str = "4D";

/// Alpha key for tinted semantic backgrounds.
pub const SEMANTIC_BG_ALPHA: &str = "semantic_bg";

/// Fixed alpha for version-control state backgrounds.
pub const VCS_BG_ALPHA: &str = "26";

/// Semantic background derivation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticBackground {
    pub name: &'static str,
    /// Alpha key to look up, or a literal alpha when `None`.
    pub alpha_key: Option<&'static str>,
    pub literal_alpha: &'static str,
    /// Prefer the opaque editor background when one is available.
    pub force_solid: bool,
}

const fn tinted(name: &'static str) -> SemanticBackground {
    SemanticBackground {
        name,
        alpha_key: Some(SEMANTIC_BG_ALPHA),
        literal_alpha: "",
        force_solid: true,
    }
}

const fn vcs(name: &'static str) -> SemanticBackground {
    SemanticBackground {
        name,
        alpha_key: None,
        literal_alpha: VCS_BG_ALPHA,
        force_solid: false,
    }
}

pub const SEMANTIC_BACKGROUNDS: &[SemanticBackground] = &[
    tinted("warning"),
    tinted("info"),
    tinted("success"),
    tinted("unreachable"),
    vcs("conflict"),
    vcs("created"),
    vcs("deleted"),
    vcs("modified"),
    vcs("renamed"),
    vcs("ignored"),
];

/// Semantic names whose background is always the editor background.
pub const EDITOR_FALLBACK_BACKGROUNDS: &[&str] = &["error", "hidden", "hint", "predictive"];

/// Chrome keys left transparent when nothing else filled them.
pub const TRANSPARENT_KEYS: &[&str] = &[
    "panel.background",
    "toolbar.background",
    "tab_bar.background",
    "tab.inactive_background",
    "border",
    "border.transparent",
];

/// `(dim slot, source slot)` pairs for the terminal ANSI palette.
pub const TERMINAL_DIMS: &[(&str, &str)] = &[
    ("terminal.ansi.dim_black", "terminal.ansi.black"),
    ("terminal.ansi.dim_red", "terminal.ansi.red"),
    ("terminal.ansi.dim_green", "terminal.ansi.green"),
    ("terminal.ansi.dim_yellow", "terminal.ansi.yellow"),
    ("terminal.ansi.dim_blue", "terminal.ansi.blue"),
    ("terminal.ansi.dim_magenta", "terminal.ansi.magenta"),
    ("terminal.ansi.dim_cyan", "terminal.ansi.cyan"),
    ("terminal.ansi.dim_white", "terminal.ansi.white"),
];

/// Which color a vim style key takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VimSlot {
    Normal,
    Insert,
    Visual,
    Replace,
    Foreground,
}

impl VimSlot {
    /// Roles tried in order for this slot.
    pub const fn preference(self) -> &'static [&'static str] {
        match self {
            VimSlot::Normal => &["foam", "pine"],
            VimSlot::Insert => &["rose", "gold"],
            VimSlot::Visual => &["iris", "rose"],
            VimSlot::Replace => &["love", "rose"],
            VimSlot::Foreground => &["base", "surface", "text"],
        }
    }
}

pub const VIM_KEYS: &[(&str, VimSlot)] = &[
    ("vim.mode.text", VimSlot::Foreground),
    ("vim.normal.background", VimSlot::Normal),
    ("vim.normal.foreground", VimSlot::Foreground),
    ("vim.helix_normal.background", VimSlot::Normal),
    ("vim.helix_normal.foreground", VimSlot::Foreground),
    ("vim.insert.background", VimSlot::Insert),
    ("vim.insert.foreground", VimSlot::Foreground),
    ("vim.visual.background", VimSlot::Visual),
    ("vim.visual.foreground", VimSlot::Foreground),
    ("vim.helix_select.background", VimSlot::Visual),
    ("vim.helix_select.foreground", VimSlot::Foreground),
    ("vim.visual_line.background", VimSlot::Visual),
    ("vim.visual_line.foreground", VimSlot::Foreground),
    ("vim.visual_block.background", VimSlot::Visual),
    ("vim.visual_block.foreground", VimSlot::Foreground),
    ("vim.replace.background", VimSlot::Replace),
    ("vim.replace.foreground", VimSlot::Foreground),
];

/// One row of the derived syntax table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxRule {
    pub category: &'static str,
    pub role: &'static str,
    pub font_style: Option<&'static str>,
    pub font_weight: Option<u16>,
}

const fn syntax(category: &'static str, role: &'static str) -> SyntaxRule {
    SyntaxRule {
        category,
        role,
        font_style: None,
        font_weight: None,
    }
}

const fn italic(category: &'static str, role: &'static str) -> SyntaxRule {
    SyntaxRule {
        font_style: Some("italic"),
        ..syntax(category, role)
    }
}

const fn weighted(category: &'static str, role: &'static str, weight: u16) -> SyntaxRule {
    SyntaxRule {
        font_weight: Some(weight),
        ..syntax(category, role)
    }
}

pub const SYNTAX_RULES: &[SyntaxRule] = &[
    syntax("text", "text"),
    italic("comment", "muted"),
    syntax("punctuation", "subtle"),
    syntax("operator", "subtle"),
    syntax("keyword", "pine"),
    syntax("string", "gold"),
    syntax("number", "foam"),
    syntax("boolean", "love"),
    syntax("function", "rose"),
    syntax("type", "foam"),
    syntax("constant", "foam"),
    syntax("variable", "text"),
    syntax("property", "text"),
    syntax("tag", "iris"),
    syntax("attribute", "rose"),
    italic("namespace", "iris"),
    italic("module", "iris"),
    syntax("string.escape", "love"),
    syntax("string.regex", "gold"),
    syntax("string.special", "pine"),
    syntax("link_text", "foam"),
    italic("link_uri", "pine"),
    italic("emphasis", "iris"),
    weighted("emphasis.strong", "iris", 700),
    weighted("title", "text", 800),
];

/// An existing syntax table at least this large is treated as complete.
pub const COMPLETE_SYNTAX_ENTRIES: usize = 20;

/// Keys whose value must always come from roles and semantics.
///
/// The override inferencer never pins these; a mismatch against a reference
/// means the palette's roles are wrong, not that an override is missing.
pub const STANDARDIZED_KEYS: &[&str] = &[
    "accents",
    "text",
    "text.muted",
    "text.placeholder",
    "text.disabled",
    "text.accent",
    "link_text.hover",
    "icon",
    "icon.muted",
    "icon.placeholder",
    "icon.disabled",
    "icon.accent",
    "editor.foreground",
    "editor.line_number",
    "editor.active_line_number",
    "editor.invisible",
    "tab.active_foreground",
    "tab.inactive_foreground",
    "status_bar.foreground",
    "title_bar.foreground",
    "panel.indent_guide_hover",
    "version_control.added",
    "version_control.deleted",
    "version_control.modified",
    "version_control.renamed",
    "version_control.conflict",
    "version_control.ignored",
    "debugger.accent",
];

/// Whether `key` must never be stored as a literal override.
pub fn is_standardized_key(key: &str) -> bool {
    if STANDARDIZED_KEYS.contains(&key) || key.starts_with("vim.") {
        return true;
    }
    let semantic = key.strip_suffix(".border").unwrap_or(key);
    SEMANTIC_DEFAULTS.iter().any(|(name, _)| *name == semantic)
}

/// Every style key written by some alpha rule, in table order, deduplicated.
pub fn alpha_derived_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = Vec::with_capacity(ALPHA_RULES.len());
    for rule in ALPHA_RULES {
        for key in rule.style_keys {
            if !keys.contains(key) {
                keys.push(key);
            }
        }
    }
    keys
}
