//! Mode — which language or format a document is in.
//!
//! The rest of the core is polymorphic over this value: comment markers,
//! raw-string delimiters, default indentation, keyword families and the
//! highlighting strategy all hang off a `Mode`.

use std::fmt;
use std::path::Path;

/// The language or file format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Ada,
    Agda,
    Amber,
    Assembly,
    Basic,
    Bat,
    C,
    Clojure,
    CMake,
    /// INI, TOML, YAML, `.conf` and friends.
    Config,
    Cpp,
    CSharp,
    Elm,
    Erlang,
    /// Commit messages and rebase todo lists.
    Git,
    Go,
    Haskell,
    Java,
    JavaScript,
    Json,
    Kotlin,
    Lisp,
    Lua,
    Make,
    /// Rendered (already formatted) man pages.
    ManPage,
    Markdown,
    Nim,
    /// Man page source.
    Nroff,
    Prolog,
    Python,
    Rust,
    Scala,
    Shell,
    Sql,
    Swift,
    Teal,
    Terra,
    #[default]
    Text,
    TypeScript,
    Vim,
    Zig,
}

impl Mode {
    /// Detect the mode from a file path: well-known file names first, then
    /// the extension. Unknown files are [`Mode::Text`].
    #[must_use]
    pub fn detect(path: &Path) -> Self {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if let Some(mode) = Self::from_file_name(name) {
            return mode;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map_or(Self::Text, Self::from_extension)
    }

    fn from_file_name(name: &str) -> Option<Self> {
        let mode = match name {
            "Makefile" | "makefile" | "GNUmakefile" => Self::Make,
            "CMakeLists.txt" => Self::CMake,
            "COMMIT_EDITMSG" | "MERGE_MSG" | "TAG_EDITMSG" | "git-rebase-todo" => Self::Git,
            ".bashrc" | ".bash_profile" | ".zshrc" | ".profile" | "PKGBUILD" => Self::Shell,
            ".vimrc" | ".gvimrc" => Self::Vim,
            ".gitconfig" | ".editorconfig" | ".gitmodules" => Self::Config,
            _ => return None,
        };
        Some(mode)
    }

    fn from_extension(ext: &str) -> Self {
        match ext {
            "adb" | "ads" | "ada" => Self::Ada,
            "agda" => Self::Agda,
            "ab" => Self::Amber,
            "asm" | "s" | "S" => Self::Assembly,
            "bas" => Self::Basic,
            "bat" | "cmd" => Self::Bat,
            "c" | "h" => Self::C,
            "clj" | "cljs" | "cljc" | "edn" => Self::Clojure,
            "cmake" => Self::CMake,
            "conf" | "cfg" | "ini" | "toml" | "yaml" | "yml" | "properties" => Self::Config,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Self::Cpp,
            "cs" => Self::CSharp,
            "elm" => Self::Elm,
            "erl" | "hrl" => Self::Erlang,
            "go" => Self::Go,
            "hs" | "lhs" => Self::Haskell,
            "java" => Self::Java,
            "js" | "mjs" | "cjs" | "jsx" => Self::JavaScript,
            "json" => Self::Json,
            "kt" | "kts" => Self::Kotlin,
            "lisp" | "lsp" | "el" | "scm" | "cl" => Self::Lisp,
            "lua" => Self::Lua,
            "mk" | "mak" => Self::Make,
            "man" => Self::ManPage,
            "md" | "markdown" => Self::Markdown,
            "nim" | "nims" => Self::Nim,
            "roff" | "ms" | "me" | "mm" => Self::Nroff,
            "pro" | "prolog" => Self::Prolog,
            "py" | "pyw" | "pyi" => Self::Python,
            "rs" => Self::Rust,
            "scala" | "sc" => Self::Scala,
            "sh" | "bash" | "zsh" | "ksh" | "fish" => Self::Shell,
            "sql" => Self::Sql,
            "swift" => Self::Swift,
            "tl" => Self::Teal,
            "t" => Self::Terra,
            "ts" | "tsx" => Self::TypeScript,
            "vim" => Self::Vim,
            "zig" => Self::Zig,
            // Man page sections: foo.1, bar.8
            e if !e.is_empty() && e.bytes().all(|b| b.is_ascii_digit()) => Self::Nroff,
            _ => Self::Text,
        }
    }

    /// Human-readable name, as shown in a status line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ada => "Ada",
            Self::Agda => "Agda",
            Self::Amber => "Amber",
            Self::Assembly => "Assembly",
            Self::Basic => "Basic",
            Self::Bat => "Batch",
            Self::C => "C",
            Self::Clojure => "Clojure",
            Self::CMake => "CMake",
            Self::Config => "Configuration",
            Self::Cpp => "C++",
            Self::CSharp => "C#",
            Self::Elm => "Elm",
            Self::Erlang => "Erlang",
            Self::Git => "Git",
            Self::Go => "Go",
            Self::Haskell => "Haskell",
            Self::Java => "Java",
            Self::JavaScript => "JavaScript",
            Self::Json => "JSON",
            Self::Kotlin => "Kotlin",
            Self::Lisp => "Lisp",
            Self::Lua => "Lua",
            Self::Make => "Make",
            Self::ManPage => "Man page",
            Self::Markdown => "Markdown",
            Self::Nim => "Nim",
            Self::Nroff => "nroff",
            Self::Prolog => "Prolog",
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::Scala => "Scala",
            Self::Shell => "Shell",
            Self::Sql => "SQL",
            Self::Swift => "Swift",
            Self::Teal => "Teal",
            Self::Terra => "Terra",
            Self::Text => "Text",
            Self::TypeScript => "TypeScript",
            Self::Vim => "Vim",
            Self::Zig => "Zig",
        }
    }

    /// The marker that starts a single-line comment, if the mode has one.
    #[must_use]
    pub const fn single_line_comment_marker(self) -> Option<&'static str> {
        match self {
            Self::C
            | Self::Cpp
            | Self::CSharp
            | Self::Go
            | Self::Java
            | Self::JavaScript
            | Self::Json
            | Self::Kotlin
            | Self::Rust
            | Self::Scala
            | Self::Swift
            | Self::TypeScript
            | Self::Zig => Some("//"),
            Self::CMake
            | Self::Config
            | Self::Git
            | Self::Make
            | Self::Nim
            | Self::Python
            | Self::Shell => Some("#"),
            Self::Ada
            | Self::Agda
            | Self::Elm
            | Self::Haskell
            | Self::Lua
            | Self::Sql
            | Self::Teal
            | Self::Terra => Some("--"),
            Self::Assembly | Self::Clojure | Self::Lisp => Some(";"),
            Self::Erlang | Self::Prolog => Some("%"),
            Self::Vim => Some("\""),
            Self::Amber => Some("!!"),
            Self::Nroff => Some(".\\\""),
            Self::Bat => Some("REM"),
            Self::Basic => Some("'"),
            Self::ManPage | Self::Markdown | Self::Text => None,
        }
    }

    /// Block comment markers, for the modes that have them.
    #[must_use]
    pub const fn block_comment_markers(self) -> Option<(&'static str, &'static str)> {
        if self.is_c_family() {
            Some(("/*", "*/"))
        } else {
            None
        }
    }

    /// The delimiter that opens and closes a multi-line string.
    #[must_use]
    pub const fn raw_string_delimiter(self) -> Option<&'static str> {
        match self {
            Self::Go | Self::JavaScript | Self::TypeScript => Some("`"),
            Self::Python | Self::Kotlin | Self::Scala | Self::Nim | Self::Swift => Some("\"\"\""),
            _ => None,
        }
    }

    /// Default indentation: `(use_spaces, width)`.
    #[must_use]
    pub const fn tabs_spaces(self) -> (bool, usize) {
        match self {
            Self::Agda
            | Self::Amber
            | Self::Assembly
            | Self::Clojure
            | Self::Config
            | Self::Erlang
            | Self::Haskell
            | Self::Json
            | Self::Lua
            | Self::Shell
            | Self::Teal
            | Self::Vim => (true, 2),
            Self::Ada | Self::Prolog => (true, 3),
            Self::C
            | Self::Go
            | Self::Lisp
            | Self::Make
            | Self::ManPage
            | Self::Nroff
            | Self::Rust => (false, 4),
            _ => (true, 4),
        }
    }

    /// Brace-and-semicolon languages sharing `/* */` comments.
    #[must_use]
    pub const fn is_c_family(self) -> bool {
        matches!(
            self,
            Self::C
                | Self::Cpp
                | Self::CSharp
                | Self::Go
                | Self::Java
                | Self::JavaScript
                | Self::Kotlin
                | Self::Rust
                | Self::Scala
                | Self::Swift
                | Self::TypeScript
        )
    }

    /// Running text rather than code. Bracket rainbows are off by default.
    #[must_use]
    pub const fn is_prose(self) -> bool {
        matches!(self, Self::Git | Self::ManPage | Self::Markdown | Self::Text)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn detect(p: &str) -> Mode {
        Mode::detect(Path::new(p))
    }

    #[test]
    fn detect_by_extension() {
        assert_eq!(detect("src/main.rs"), Mode::Rust);
        assert_eq!(detect("a/b/c.go"), Mode::Go);
        assert_eq!(detect("notes.md"), Mode::Markdown);
        assert_eq!(detect("Cargo.toml"), Mode::Config);
        assert_eq!(detect("query.sql"), Mode::Sql);
    }

    #[test]
    fn detect_by_file_name() {
        assert_eq!(detect("Makefile"), Mode::Make);
        assert_eq!(detect("proj/CMakeLists.txt"), Mode::CMake);
        assert_eq!(detect(".git/COMMIT_EDITMSG"), Mode::Git);
        assert_eq!(detect(".git/rebase-merge/git-rebase-todo"), Mode::Git);
    }

    #[test]
    fn numeric_extension_is_nroff() {
        assert_eq!(detect("ls.1"), Mode::Nroff);
        assert_eq!(detect("ls.man"), Mode::ManPage);
    }

    #[test]
    fn unknown_is_text() {
        assert_eq!(detect("README"), Mode::Text);
        assert_eq!(detect("x.unknownext"), Mode::Text);
    }

    #[test]
    fn comment_markers() {
        assert_eq!(Mode::Rust.single_line_comment_marker(), Some("//"));
        assert_eq!(Mode::Haskell.single_line_comment_marker(), Some("--"));
        assert_eq!(Mode::Vim.single_line_comment_marker(), Some("\""));
        assert_eq!(Mode::Nroff.single_line_comment_marker(), Some(".\\\""));
        assert_eq!(Mode::Markdown.single_line_comment_marker(), None);
    }

    #[test]
    fn only_c_family_has_block_comments() {
        assert_eq!(Mode::Java.block_comment_markers(), Some(("/*", "*/")));
        assert_eq!(Mode::Shell.block_comment_markers(), None);
        assert_eq!(Mode::Lua.block_comment_markers(), None);
    }

    #[test]
    fn indentation_defaults() {
        assert_eq!(Mode::Go.tabs_spaces(), (false, 4));
        assert_eq!(Mode::Json.tabs_spaces(), (true, 2));
        assert_eq!(Mode::Ada.tabs_spaces(), (true, 3));
        assert_eq!(Mode::Python.tabs_spaces(), (true, 4));
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Mode::Cpp.to_string(), "C++");
    }
}
