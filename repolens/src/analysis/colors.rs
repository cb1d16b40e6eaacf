//! Deterministic language-to-color mapping.
//!
//! Colors follow the conventional GitHub language palette so badges look
//! familiar; unknown languages share one neutral fallback.

/// Fallback color for languages without a palette entry.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#8b949e";

/// Map a language name to its display color.
///
/// The mapping is a pure function: the same input always yields the same
/// color, and lookup is case-sensitive to match the backend's language
/// names exactly.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "Rust" => "#dea584",
        "TypeScript" => "#3178c6",
        "JavaScript" => "#f1e05a",
        "Python" => "#3572a5",
        "Go" => "#00add8",
        "C" => "#555555",
        "C++" => "#f34b7d",
        "C#" => "#178600",
        "Java" => "#b07219",
        "Kotlin" => "#a97bff",
        "Swift" => "#f05138",
        "Ruby" => "#701516",
        "PHP" => "#4f5d95",
        "Shell" => "#89e051",
        "HTML" => "#e34c26",
        "CSS" => "#663399",
        "Dart" => "#00b4ab",
        "Elixir" => "#6e4a7e",
        "Haskell" => "#5e5086",
        "Lua" => "#000080",
        "Zig" => "#ec915c",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}
