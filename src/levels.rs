/// A single puzzle: an image that hides a target word.
///
/// Levels are static data; play order is the array order and the last
/// level is the one eligible for bonus scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub image: &'static str,
    pub word: &'static str,
}

/// Points awarded per solved level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTable {
    pub regular: u32,
    pub bonus: u32,
}

pub const SCORES: ScoreTable = ScoreTable {
    regular: 250,
    bonus: 375,
};

pub const LEVELS: [Level; 5] = [
    Level {
        image: "https://i.postimg.cc/yNdYWJwL/Screenshot-2025-11-16-15-56-25-71-84c9ef400ab248a2e4a3b31139e21163.jpg",
        word: "OM1",
    },
    Level {
        image: "https://i.postimg.cc/kGY4WG4b/Screenshot-2025-11-16-19-05-13-45-40deb401b9ffe8e1df2f1cc5ba480b12.jpg",
        word: "Fabric",
    },
    Level {
        image: "https://i.postimg.cc/kXwNhvVY/Screenshot-2025-11-16-19-13-45-72-40deb401b9ffe8e1df2f1cc5ba480b12.jpg",
        word: "AGI",
    },
    Level {
        image: "https://i.postimg.cc/hjgfBN6m/Screenshot-2025-11-16-19-08-20-75-40deb401b9ffe8e1df2f1cc5ba480b12.jpg",
        word: "SDK",
    },
    Level {
        image: "https://i.postimg.cc/x1cmpDV2/Screenshot-2025-11-16-19-10-57-12-40deb401b9ffe8e1df2f1cc5ba480b12.jpg",
        word: "API",
    },
];
