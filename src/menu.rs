/// One link on a menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub href: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const HOME_MENU: [MenuEntry; 4] = [
    MenuEntry {
        href: "/casual",
        label: "Bahasa Inggris Casual",
        description: "Untuk percakapan sehari-hari dan situasi umum.",
    },
    MenuEntry {
        href: "/activity/slang/general",
        label: "Bahasa Inggris Slang",
        description: "Pelajari ungkapan gaul terbaru.",
    },
    MenuEntry {
        href: "/activity/hood/general",
        label: "Bahasa Inggris \"Hood\"",
        description: "Pahami bahasa yang digunakan di lingkungan tertentu.",
    },
    MenuEntry {
        href: "/activity/idioms/general",
        label: "Bahasa Inggris Idioms",
        description: "Kuasai ungkapan idiomatik untuk berbicara seperti native.",
    },
];

pub const CASUAL_LEVELS: [MenuEntry; 4] = [
    MenuEntry {
        href: "/activity/casual/beginner",
        label: "Beginner",
        description: "Dasar-dasar untuk pemula.",
    },
    MenuEntry {
        href: "/activity/casual/intermediate",
        label: "Intermediate",
        description: "Tingkatkan kemampuan percakapan Anda.",
    },
    MenuEntry {
        href: "/activity/casual/advanced",
        label: "Advanced",
        description: "Menuju kefasihan tingkat lanjut.",
    },
    MenuEntry {
        href: "/activity/casual/business",
        label: "Business",
        description: "Bahasa Inggris untuk dunia profesional.",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CasualIndex,
    Activity { category: String, level: String },
}

impl Route {
    /// Resolves a path like `/activity/idioms/general`. Unknown paths give `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Some(Route::Home),
            ["casual"] => Some(Route::CasualIndex),
            ["activity", category, level] => Some(Route::Activity {
                category: category.to_string(),
                level: level.to_string(),
            }),
            _ => None,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Heading of an activity page, e.g. `Beginner Casual`.
pub fn page_title(category: Option<&str>, level: Option<&str>) -> String {
    let level = level
        .filter(|l| !l.is_empty())
        .map(capitalize)
        .unwrap_or_else(|| String::from("Umum"));
    let category = category
        .filter(|c| !c.is_empty())
        .map(capitalize)
        .unwrap_or_else(|| String::from("Aktivitas"));

    format!("{} {}", level, category)
}

/// Where the back link of an activity page goes.
pub fn back_path(category: Option<&str>) -> &'static str {
    match category {
        Some("casual") => "/casual",
        _ => "/",
    }
}
