//! File extension to language mapping

/// Extensions folded into a canonical one before lookup
const EXTENSION_ALIASES: &[(&str, &str)] = &[
    ("jsx", "js"),
    ("cjs", "js"),
    ("mjs", "js"),
    ("tsx", "ts"),
];

/// Canonical extension -> language name
const LANGUAGES: &[(&str, &str)] = &[
    ("astro", "Astro"),
    ("c", "C"),
    ("h", "C"),
    ("cc", "C++"),
    ("cpp", "C++"),
    ("cxx", "C++"),
    ("hpp", "C++"),
    ("cs", "C#"),
    ("clj", "Clojure"),
    ("css", "CSS"),
    ("dart", "Dart"),
    ("ex", "Elixir"),
    ("exs", "Elixir"),
    ("elm", "Elm"),
    ("erl", "Erlang"),
    ("fs", "F#"),
    ("go", "Go"),
    ("gql", "GraphQL"),
    ("graphql", "GraphQL"),
    ("groovy", "Groovy"),
    ("hs", "Haskell"),
    ("html", "HTML"),
    ("java", "Java"),
    ("js", "JavaScript"),
    ("json", "JSON"),
    ("jl", "Julia"),
    ("kt", "Kotlin"),
    ("kts", "Kotlin"),
    ("less", "Less"),
    ("lua", "Lua"),
    ("md", "Markdown"),
    ("mdx", "MDX"),
    ("m", "Objective-C"),
    ("ml", "OCaml"),
    ("php", "PHP"),
    ("pl", "Perl"),
    ("prisma", "Prisma"),
    ("ps1", "PowerShell"),
    ("py", "Python"),
    ("r", "R"),
    ("rb", "Ruby"),
    ("rs", "Rust"),
    ("scala", "Scala"),
    ("scss", "SCSS"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("zsh", "Shell"),
    ("sol", "Solidity"),
    ("sql", "SQL"),
    ("svelte", "Svelte"),
    ("swift", "Swift"),
    ("tf", "Terraform"),
    ("toml", "TOML"),
    ("ts", "TypeScript"),
    ("vue", "Vue"),
    ("xml", "XML"),
    ("yaml", "YAML"),
    ("yml", "YAML"),
    ("zig", "Zig"),
];

/// Fold aliased extensions (`jsx`, `cjs`, `mjs`, `tsx`) into their canonical form
pub fn normalize_extension(extension: &str) -> String {
    let lower = extension.to_ascii_lowercase();
    EXTENSION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(lower)
}

/// Look up the language for a file extension, after normalization
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    let canonical = normalize_extension(extension);
    LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == canonical)
        .map(|(_, language)| *language)
}
