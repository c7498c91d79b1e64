//! Language definitions for the C-like scanner.

/// Keywords, types and delimiters for one language.
///
/// Keyword and type lists are kept sorted so membership is a binary search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageDef {
    name: String,
    keywords: Vec<String>,
    types: Vec<String>,
    line_comment: String,
    block_open: String,
    block_close: String,
    preprocessor: Option<u8>,
    extensions: Vec<String>,
}

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "break", "case",
    "catch", "class", "co_await", "co_return", "co_yield", "compl", "concept", "const",
    "const_cast", "consteval", "constexpr", "constinit", "continue", "decltype", "default",
    "delete", "do", "dynamic_cast", "else", "enum", "explicit", "export", "extern", "false",
    "for", "friend", "goto", "if", "inline", "module", "mutable", "namespace", "new",
    "noexcept", "not", "not_eq", "nullptr", "operator", "or", "or_eq", "private", "protected",
    "public", "register", "reinterpret_cast", "requires", "return", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "throw", "true",
    "try", "typedef", "typeid", "typename", "union", "using", "virtual", "volatile", "while",
    "xor", "xor_eq",
];

const CPP_TYPES: &[&str] = &[
    "bool", "char", "char8_t", "char16_t", "char32_t", "double", "float", "int", "int8_t",
    "int16_t", "int32_t", "int64_t", "long", "short", "signed", "size_t", "ssize_t", "uint8_t",
    "uint16_t", "uint32_t", "uint64_t", "unsigned", "void", "wchar_t", "string", "string_view",
    "vector", "map", "set", "unordered_map", "unordered_set", "array", "pair", "tuple",
    "shared_ptr", "unique_ptr", "weak_ptr", "optional", "variant", "any", "FILE",
];

const CPP_EXTENSIONS: &[&str] = &["cpp", "cxx", "cc", "c", "h", "hpp", "hxx", "inl"];

fn sorted(words: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
    words.sort_unstable();
    words.dedup();
    words
}

impl LanguageDef {
    /// Language with no keywords and C-style comment delimiters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keywords: Vec::new(),
            types: Vec::new(),
            line_comment: "//".to_string(),
            block_open: "/*".to_string(),
            block_close: "*/".to_string(),
            preprocessor: None,
            extensions: Vec::new(),
        }
    }

    /// Built-in C and C++ definition.
    #[must_use]
    pub fn cpp() -> Self {
        Self::new("cpp")
            .with_keywords(CPP_KEYWORDS.iter().copied())
            .with_types(CPP_TYPES.iter().copied())
            .with_preprocessor(b'#')
            .with_extensions(CPP_EXTENSIONS.iter().copied())
    }

    #[must_use]
    pub fn with_keywords(mut self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = sorted(words);
        self
    }

    #[must_use]
    pub fn with_types(mut self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.types = sorted(words);
        self
    }

    /// Line comment opener. An empty string disables line comments.
    #[must_use]
    pub fn with_line_comment(mut self, marker: impl Into<String>) -> Self {
        self.line_comment = marker.into();
        self
    }

    /// Block comment delimiters. An empty opener disables block comments.
    #[must_use]
    pub fn with_block_comment(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.block_open = open.into();
        self.block_close = close.into();
        self
    }

    /// Byte that starts a directive when it is the first non-blank on a line.
    #[must_use]
    pub fn with_preprocessor(mut self, marker: u8) -> Self {
        self.preprocessor = Some(marker);
        self
    }

    /// File extensions, with or without a leading dot.
    #[must_use]
    pub fn with_extensions(mut self, exts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = exts
            .into_iter()
            .map(|ext| {
                let ext: String = ext.into();
                ext.trim_start_matches('.').to_ascii_lowercase()
            })
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.types
    }

    #[must_use]
    pub fn line_comment(&self) -> &[u8] {
        self.line_comment.as_bytes()
    }

    #[must_use]
    pub fn block_open(&self) -> &[u8] {
        self.block_open.as_bytes()
    }

    #[must_use]
    pub fn block_close(&self) -> &[u8] {
        self.block_close.as_bytes()
    }

    #[must_use]
    pub fn preprocessor(&self) -> Option<u8> {
        self.preprocessor
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    #[must_use]
    pub fn is_keyword(&self, word: &[u8]) -> bool {
        contains_sorted(&self.keywords, word)
    }

    #[must_use]
    pub fn is_type(&self, word: &[u8]) -> bool {
        contains_sorted(&self.types, word)
    }

    /// True if `ext` (with or without dot, any case) belongs to this language.
    #[must_use]
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

fn contains_sorted(list: &[String], word: &[u8]) -> bool {
    list.binary_search_by(|probe| probe.as_bytes().cmp(word))
        .is_ok()
}
