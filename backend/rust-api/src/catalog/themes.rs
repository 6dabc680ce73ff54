use super::Theme;

pub const THEME_CATEGORIES: &[&str] = &[
    "All",
    "Minimalist",
    "Nature",
    "Anime",
    "Comics",
    "Fantasy",
    "Tech",
    "Festive",
    "Seasonal",
];

pub static THEMES: &[Theme] = &[
    Theme {
        id: "clean-light",
        name: "Clean Light",
        category: "Minimalist",
        background: "linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%)",
        primary: "#667eea",
        secondary: "#764ba2",
        accent: "#f093fb",
        text: "#2d3748",
        card_bg: "rgba(255,255,255,0.9)",
        animation: "fadeIn",
        special: None,
    },
    Theme {
        id: "pure-dark",
        name: "Pure Dark",
        category: "Minimalist",
        background: "linear-gradient(135deg, #0c0c0c 0%, #1a1a1a 100%)",
        primary: "#4299e1",
        secondary: "#805ad5",
        accent: "#ed64a6",
        text: "#e2e8f0",
        card_bg: "rgba(26,32,44,0.9)",
        animation: "slideUp",
        special: None,
    },
    Theme {
        id: "frosted-glass",
        name: "Frosted Glass",
        category: "Minimalist",
        background: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        primary: "#ffffff",
        secondary: "#f7fafc",
        accent: "#bee3f8",
        text: "#2d3748",
        card_bg: "rgba(255,255,255,0.2)",
        animation: "blur",
        special: Some("backdrop-blur"),
    },
    Theme {
        id: "gradient-glow",
        name: "Gradient Glow",
        category: "Minimalist",
        background: "linear-gradient(45deg, #ff9a9e 0%, #fecfef 50%, #fecfef 100%)",
        primary: "#e53e3e",
        secondary: "#d53f8c",
        accent: "#ed64a6",
        text: "#2d3748",
        card_bg: "rgba(255,255,255,0.8)",
        animation: "glow",
        special: None,
    },
    Theme {
        id: "neumorphism",
        name: "Neumorphism",
        category: "Minimalist",
        background: "linear-gradient(135deg, #e3e3e3 0%, #f0f0f0 100%)",
        primary: "#4a5568",
        secondary: "#718096",
        accent: "#4299e1",
        text: "#2d3748",
        card_bg: "rgba(240,240,240,0.9)",
        animation: "morph",
        special: Some("neumorphic"),
    },
    Theme {
        id: "forest-vibes",
        name: "Forest Vibes",
        category: "Nature",
        background: "linear-gradient(135deg, #134e5e 0%, #71b280 100%)",
        primary: "#38a169",
        secondary: "#68d391",
        accent: "#9ae6b4",
        text: "#f7fafc",
        card_bg: "rgba(56,161,105,0.2)",
        animation: "leaves",
        special: None,
    },
    Theme {
        id: "ocean-blue",
        name: "Ocean Blue",
        category: "Nature",
        background: "linear-gradient(135deg, #667db6 0%, #0082c8 100%)",
        primary: "#3182ce",
        secondary: "#4299e1",
        accent: "#63b3ed",
        text: "#f7fafc",
        card_bg: "rgba(49,130,206,0.2)",
        animation: "waves",
        special: None,
    },
    Theme {
        id: "sakura-bloom",
        name: "Sakura Bloom",
        category: "Nature",
        background: "linear-gradient(135deg, #ffecd2 0%, #fcb69f 100%)",
        primary: "#ed64a6",
        secondary: "#f687b3",
        accent: "#fbb6ce",
        text: "#2d3748",
        card_bg: "rgba(237,100,166,0.1)",
        animation: "petals",
        special: None,
    },
    Theme {
        id: "mountain-peaks",
        name: "Mountain Peaks",
        category: "Nature",
        background: "linear-gradient(135deg, #2c3e50 0%, #4ca1af 100%)",
        primary: "#4a5568",
        secondary: "#718096",
        accent: "#a0aec0",
        text: "#f7fafc",
        card_bg: "rgba(74,85,104,0.2)",
        animation: "mountains",
        special: None,
    },
    Theme {
        id: "desert-mirage",
        name: "Desert Mirage",
        category: "Nature",
        background: "linear-gradient(135deg, #f7971e 0%, #ffd200 100%)",
        primary: "#dd6b20",
        secondary: "#ed8936",
        accent: "#f6ad55",
        text: "#2d3748",
        card_bg: "rgba(221,107,32,0.1)",
        animation: "sand",
        special: None,
    },
    Theme {
        id: "naruto-ninja",
        name: "Naruto Ninja",
        category: "Anime",
        background: "linear-gradient(135deg, #ff7f00 0%, #ffb347 100%)",
        primary: "#ff7f00",
        secondary: "#ff9500",
        accent: "#ffb347",
        text: "#2d3748",
        card_bg: "rgba(255,127,0,0.1)",
        animation: "ninja",
        special: None,
    },
    Theme {
        id: "one-piece-adventure",
        name: "One Piece Adventure",
        category: "Anime",
        background: "linear-gradient(135deg, #1e3c72 0%, #2a5298 100%)",
        primary: "#2b6cb0",
        secondary: "#3182ce",
        accent: "#4299e1",
        text: "#f7fafc",
        card_bg: "rgba(43,108,176,0.2)",
        animation: "pirate",
        special: None,
    },
    Theme {
        id: "jujutsu-cursed",
        name: "Jujutsu Cursed",
        category: "Anime",
        background: "linear-gradient(135deg, #2d1b69 0%, #11998e 100%)",
        primary: "#553c9a",
        secondary: "#667eea",
        accent: "#764ba2",
        text: "#f7fafc",
        card_bg: "rgba(85,60,154,0.2)",
        animation: "cursed",
        special: None,
    },
    Theme {
        id: "marvel-hero",
        name: "Marvel Hero",
        category: "Comics",
        background: "linear-gradient(135deg, #e53e3e 0%, #3182ce 100%)",
        primary: "#e53e3e",
        secondary: "#3182ce",
        accent: "#ffd700",
        text: "#f7fafc",
        card_bg: "rgba(229,62,62,0.2)",
        animation: "hero",
        special: None,
    },
    Theme {
        id: "harry-potter",
        name: "Harry Potter Magic",
        category: "Fantasy",
        background: "linear-gradient(135deg, #2d1b69 0%, #8b5a2b 100%)",
        primary: "#553c9a",
        secondary: "#8b5a2b",
        accent: "#ffd700",
        text: "#f7fafc",
        card_bg: "rgba(85,60,154,0.2)",
        animation: "magic",
        special: None,
    },
    Theme {
        id: "cyberpunk-city",
        name: "Cyberpunk City",
        category: "Tech",
        background: "linear-gradient(135deg, #0f0f23 0%, #ff00ff 100%)",
        primary: "#ff00ff",
        secondary: "#00ffff",
        accent: "#ffff00",
        text: "#f7fafc",
        card_bg: "rgba(255,0,255,0.1)",
        animation: "neon",
        special: None,
    },
    Theme {
        id: "holographic-waves",
        name: "Holographic Waves",
        category: "Tech",
        background: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        primary: "#667eea",
        secondary: "#764ba2",
        accent: "#f093fb",
        text: "#f7fafc",
        card_bg: "rgba(102,126,234,0.2)",
        animation: "hologram",
        special: None,
    },
    Theme {
        id: "code-matrix",
        name: "Code Matrix",
        category: "Tech",
        background: "linear-gradient(135deg, #000000 0%, #0d4f3c 100%)",
        primary: "#00ff00",
        secondary: "#00cc00",
        accent: "#00aa00",
        text: "#00ff00",
        card_bg: "rgba(0,255,0,0.1)",
        animation: "matrix",
        special: None,
    },
    Theme {
        id: "space-galaxy",
        name: "Space Galaxy",
        category: "Tech",
        background: "linear-gradient(135deg, #000428 0%, #004e92 100%)",
        primary: "#4299e1",
        secondary: "#63b3ed",
        accent: "#90cdf4",
        text: "#f7fafc",
        card_bg: "rgba(66,153,225,0.2)",
        animation: "stars",
        special: None,
    },
    Theme {
        id: "ai-neural",
        name: "AI Neural Grid",
        category: "Tech",
        background: "linear-gradient(135deg, #1a202c 0%, #2d3748 100%)",
        primary: "#4299e1",
        secondary: "#63b3ed",
        accent: "#90cdf4",
        text: "#f7fafc",
        card_bg: "rgba(66,153,225,0.2)",
        animation: "neural",
        special: None,
    },
    Theme {
        id: "halloween-night",
        name: "Halloween Night",
        category: "Festive",
        background: "linear-gradient(135deg, #2d1b69 0%, #ff7f00 100%)",
        primary: "#ff7f00",
        secondary: "#553c9a",
        accent: "#ffd700",
        text: "#f7fafc",
        card_bg: "rgba(255,127,0,0.2)",
        animation: "spooky",
        special: None,
    },
    Theme {
        id: "christmas-magic",
        name: "Christmas Magic",
        category: "Festive",
        background: "linear-gradient(135deg, #0f4c75 0%, #3282b8 100%)",
        primary: "#e53e3e",
        secondary: "#38a169",
        accent: "#ffd700",
        text: "#f7fafc",
        card_bg: "rgba(229,62,62,0.2)",
        animation: "snow",
        special: None,
    },
    Theme {
        id: "diwali-lights",
        name: "Diwali Lights",
        category: "Festive",
        background: "linear-gradient(135deg, #ff7f00 0%, #ffd700 100%)",
        primary: "#dd6b20",
        secondary: "#ed8936",
        accent: "#f6ad55",
        text: "#2d3748",
        card_bg: "rgba(221,107,32,0.1)",
        animation: "fireworks",
        special: None,
    },
    Theme {
        id: "summer-breeze",
        name: "Summer Breeze",
        category: "Seasonal",
        background: "linear-gradient(135deg, #ffecd2 0%, #fcb69f 100%)",
        primary: "#ed8936",
        secondary: "#f6ad55",
        accent: "#fbd38d",
        text: "#2d3748",
        card_bg: "rgba(237,137,54,0.1)",
        animation: "breeze",
        special: None,
    },
    Theme {
        id: "monsoon-blues",
        name: "Monsoon Blues",
        category: "Seasonal",
        background: "linear-gradient(135deg, #667db6 0%, #0082c8 100%)",
        primary: "#3182ce",
        secondary: "#4299e1",
        accent: "#63b3ed",
        text: "#f7fafc",
        card_bg: "rgba(49,130,206,0.2)",
        animation: "rain",
        special: None,
    },
];
