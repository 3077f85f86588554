//! Keyword families.
//!
//! A handful of word lists shared by modes that look alike. The tokenizer
//! asks [`Keywords::classify`] about every identifier it finds.

use tilde_theme::TokenKind;

use crate::mode::Mode;

/// The reserved words of one language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keywords {
    pub keywords: &'static [&'static str],
    pub types: &'static [&'static str],
    pub booleans: &'static [&'static str],
    /// SQL, Ada, Basic and batch files ignore case.
    pub case_insensitive: bool,
}

const COMMON_BOOLEANS: &[&str] = &["true", "false"];

const RUST: Keywords = Keywords {
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "static", "struct", "super", "trait", "type", "unsafe",
        "use", "where", "while",
    ],
    types: &[
        "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "str", "u8",
        "u16", "u32", "u64", "u128", "usize",
    ],
    booleans: COMMON_BOOLEANS,
    case_insensitive: false,
};

const C_LIKE: Keywords = Keywords {
    keywords: &[
        "abstract", "auto", "break", "case", "catch", "class", "const", "continue", "default",
        "defer", "delete", "do", "else", "enum", "export", "extends", "extern", "final",
        "finally", "for", "func", "function", "go", "goto", "if", "implements", "import", "in",
        "instanceof", "interface", "let", "namespace", "new", "nil", "null", "package",
        "private", "protected", "public", "range", "return", "select", "sizeof", "static",
        "struct", "switch", "this", "throw", "throws", "try", "typedef", "typeof", "union",
        "using", "val", "var", "void", "volatile", "while", "fun", "override", "chan", "map",
        "type",
    ],
    types: &[
        "bool", "boolean", "byte", "char", "double", "float", "int", "int8", "int16", "int32",
        "int64", "long", "rune", "short", "signed", "string", "uint", "uint8", "uint16",
        "uint32", "uint64", "unsigned", "error", "any",
    ],
    booleans: COMMON_BOOLEANS,
    case_insensitive: false,
};

const ZIG: Keywords = Keywords {
    keywords: &[
        "break", "comptime", "const", "continue", "defer", "else", "enum", "errdefer", "error",
        "export", "extern", "fn", "for", "if", "inline", "null", "orelse", "pub", "return",
        "struct", "switch", "test", "try", "undefined", "union", "unreachable", "var", "while",
    ],
    types: &[
        "bool", "f32", "f64", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64",
        "usize", "void", "anytype", "type",
    ],
    booleans: COMMON_BOOLEANS,
    case_insensitive: false,
};

const PYTHONIC: Keywords = Keywords {
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "proc", "raise", "return", "try", "var",
        "while", "with", "yield", "None",
    ],
    types: &["int", "float", "str", "bytes", "list", "dict", "set", "tuple", "bool"],
    booleans: &["True", "False", "true", "false"],
    case_insensitive: false,
};

const SHELL: Keywords = Keywords {
    keywords: &[
        "case", "do", "done", "elif", "else", "esac", "export", "fi", "for", "function", "if",
        "in", "local", "return", "then", "until", "while", "set", "unset", "source",
        "include", "ifeq", "ifneq", "endif", "define", "endef", "project", "add_executable",
        "add_library", "target_link_libraries",
    ],
    types: &[],
    booleans: &["true", "false", "yes", "no", "on", "off"],
    case_insensitive: false,
};

const CONFIG: Keywords = Keywords {
    keywords: &[],
    types: &[],
    booleans: &["true", "false", "yes", "no", "on", "off"],
    case_insensitive: true,
};

const LUA_LIKE: Keywords = Keywords {
    keywords: &[
        "and", "break", "do", "else", "elseif", "end", "for", "function", "global", "goto",
        "if", "in", "local", "nil", "not", "or", "record", "repeat", "return", "then", "until",
        "while", "quote", "escape", "terra",
    ],
    types: &["number", "string", "boolean", "table"],
    booleans: COMMON_BOOLEANS,
    case_insensitive: false,
};

const FUNCTIONAL: Keywords = Keywords {
    keywords: &[
        "case", "class", "data", "deriving", "do", "else", "exposing", "if", "import", "in",
        "infix", "instance", "let", "module", "of", "then", "type", "where", "alias", "port",
        "record", "open", "fun", "end", "receive", "after", "when",
    ],
    types: &["Int", "Integer", "Float", "Double", "String", "Bool", "Char", "Maybe"],
    booleans: &["True", "False", "true", "false"],
    case_insensitive: false,
};

const SQL_LIKE: Keywords = Keywords {
    keywords: &[
        "select", "from", "where", "insert", "into", "values", "update", "set", "delete",
        "create", "table", "drop", "alter", "join", "left", "right", "inner", "outer", "on",
        "and", "or", "not", "null", "order", "by", "group", "having", "limit", "as", "begin",
        "end", "procedure", "function", "is", "if", "then", "else", "loop", "return", "with",
        "package", "body", "declare", "type", "dim", "sub", "next", "goto", "echo", "call",
        "rem",
    ],
    types: &["integer", "int", "varchar", "text", "boolean", "float", "date", "string"],
    booleans: COMMON_BOOLEANS,
    case_insensitive: true,
};

const LISP_LIKE: Keywords = Keywords {
    keywords: &[
        "defun", "defn", "defmacro", "def", "defvar", "defparameter", "let", "lambda", "fn",
        "if", "cond", "when", "unless", "loop", "progn", "do", "ns", "require", "setq", "quote",
    ],
    types: &[],
    booleans: &["t", "nil", "true", "false"],
    case_insensitive: false,
};

const VIM: Keywords = Keywords {
    keywords: &[
        "if", "else", "elseif", "endif", "for", "endfor", "while", "endwhile", "function",
        "endfunction", "let", "set", "call", "return", "augroup", "autocmd", "map", "nnoremap",
        "inoremap", "vnoremap", "syntax", "highlight",
    ],
    types: &[],
    booleans: &[],
    case_insensitive: false,
};

const NONE: Keywords = Keywords {
    keywords: &[],
    types: &[],
    booleans: &[],
    case_insensitive: false,
};

impl Keywords {
    /// The keyword family for a mode.
    #[must_use]
    pub const fn for_mode(mode: Mode) -> &'static Self {
        match mode {
            Mode::Rust => &RUST,
            Mode::Zig => &ZIG,
            Mode::C
            | Mode::Cpp
            | Mode::CSharp
            | Mode::Go
            | Mode::Java
            | Mode::JavaScript
            | Mode::Kotlin
            | Mode::Scala
            | Mode::Swift
            | Mode::TypeScript => &C_LIKE,
            Mode::Python | Mode::Nim => &PYTHONIC,
            Mode::Shell | Mode::Make | Mode::CMake => &SHELL,
            Mode::Config | Mode::Json => &CONFIG,
            Mode::Lua | Mode::Teal | Mode::Terra => &LUA_LIKE,
            Mode::Haskell | Mode::Elm | Mode::Agda | Mode::Erlang | Mode::Prolog => &FUNCTIONAL,
            Mode::Sql | Mode::Ada | Mode::Basic | Mode::Bat => &SQL_LIKE,
            Mode::Lisp | Mode::Clojure => &LISP_LIKE,
            Mode::Vim => &VIM,
            Mode::Amber
            | Mode::Assembly
            | Mode::Git
            | Mode::ManPage
            | Mode::Markdown
            | Mode::Nroff
            | Mode::Text => &NONE,
        }
    }

    /// Classify an identifier: keyword, type, boolean, or `None`.
    #[must_use]
    pub fn classify(&self, word: &str) -> Option<TokenKind> {
        let hit = |list: &[&str]| {
            if self.case_insensitive {
                list.iter().any(|w| w.eq_ignore_ascii_case(word))
            } else {
                list.contains(&word)
            }
        };
        if hit(self.booleans) {
            Some(TokenKind::Boolean)
        } else if hit(self.keywords) {
            Some(TokenKind::Keyword)
        } else if hit(self.types) {
            Some(TokenKind::Type)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_keywords() {
        let k = Keywords::for_mode(Mode::Rust);
        assert_eq!(k.classify("fn"), Some(TokenKind::Keyword));
        assert_eq!(k.classify("u8"), Some(TokenKind::Type));
        assert_eq!(k.classify("true"), Some(TokenKind::Boolean));
        assert_eq!(k.classify("foo"), None);
    }

    #[test]
    fn config_booleans_ignore_case() {
        let k = Keywords::for_mode(Mode::Config);
        for word in ["yes", "No", "ON", "off", "True"] {
            assert_eq!(k.classify(word), Some(TokenKind::Boolean), "{word}");
        }
    }

    #[test]
    fn sql_is_case_insensitive() {
        let k = Keywords::for_mode(Mode::Sql);
        assert_eq!(k.classify("SELECT"), Some(TokenKind::Keyword));
        assert_eq!(k.classify("select"), Some(TokenKind::Keyword));
    }

    #[test]
    fn case_sensitive_families_stay_sensitive() {
        let k = Keywords::for_mode(Mode::Go);
        assert_eq!(k.classify("func"), Some(TokenKind::Keyword));
        assert_eq!(k.classify("FUNC"), None);
    }

    #[test]
    fn prose_has_no_keywords() {
        assert_eq!(Keywords::for_mode(Mode::Markdown).classify("if"), None);
    }
}
