use super::Avatar;

pub const AVATAR_CATEGORIES: &[&str] = &[
    "All",
    "Anime",
    "Professional",
    "Fantasy",
    "Pets",
    "Mood",
    "Gaming",
    "Creative",
    "Cute",
    "Spooky",
    "Retro",
];

pub static AVATARS: &[Avatar] = &[
    Avatar {
        id: "anime-student",
        name: "Anime Student",
        category: "Anime",
        style: "manga",
        animation: "blink",
        colors: ["#ff6b6b", "#4ecdc4", "#45b7d1"],
    },
    Avatar {
        id: "chibi-cute",
        name: "Chibi Cute",
        category: "Anime",
        style: "chibi",
        animation: "bounce",
        colors: ["#ff9ff3", "#54a0ff", "#5f27cd"],
    },
    Avatar {
        id: "pixel-hero",
        name: "Pixel Hero",
        category: "Retro",
        style: "pixel",
        animation: "glow",
        colors: ["#00d2d3", "#ff9ff3", "#54a0ff"],
    },
    Avatar {
        id: "manga-warrior",
        name: "Manga Warrior",
        category: "Anime",
        style: "manga",
        animation: "power",
        colors: ["#ff6348", "#2ed573", "#1e90ff"],
    },
    Avatar {
        id: "kawaii-monster",
        name: "Kawaii Monster",
        category: "Cute",
        style: "kawaii",
        animation: "wiggle",
        colors: ["#ff6b9d", "#c44569", "#f8b500"],
    },
    Avatar {
        id: "coder-dev",
        name: "Coder Developer",
        category: "Professional",
        style: "modern",
        animation: "typing",
        colors: ["#2ed573", "#1e90ff", "#ff4757"],
    },
    Avatar {
        id: "artist-creative",
        name: "Creative Artist",
        category: "Professional",
        style: "artistic",
        animation: "paint",
        colors: ["#ff6348", "#ff9ff3", "#54a0ff"],
    },
    Avatar {
        id: "gamer-pro",
        name: "Pro Gamer",
        category: "Gaming",
        style: "gaming",
        animation: "rgb",
        colors: ["#00ff00", "#ff00ff", "#00ffff"],
    },
    Avatar {
        id: "music-lover",
        name: "Music Lover",
        category: "Creative",
        style: "musical",
        animation: "beat",
        colors: ["#ff6b6b", "#4ecdc4", "#45b7d1"],
    },
    Avatar {
        id: "streamer-live",
        name: "Live Streamer",
        category: "Gaming",
        style: "streaming",
        animation: "live",
        colors: ["#ff4757", "#2ed573", "#1e90ff"],
    },
    Avatar {
        id: "dragon-rider",
        name: "Dragon Rider",
        category: "Fantasy",
        style: "fantasy",
        animation: "fire",
        colors: ["#ff4757", "#ff6348", "#ffa502"],
    },
    Avatar {
        id: "elf-mage",
        name: "Elf Mage",
        category: "Fantasy",
        style: "fantasy",
        animation: "magic",
        colors: ["#3742fa", "#2f3542", "#57606f"],
    },
    Avatar {
        id: "viking-warrior",
        name: "Viking Warrior",
        category: "Fantasy",
        style: "warrior",
        animation: "battle",
        colors: ["#8b4513", "#cd853f", "#daa520"],
    },
    Avatar {
        id: "ghost-spirit",
        name: "Ghost Spirit",
        category: "Spooky",
        style: "ghost",
        animation: "float",
        colors: ["#ffffff", "#e6e6fa", "#b0c4de"],
    },
    Avatar {
        id: "vampire-lord",
        name: "Vampire Lord",
        category: "Spooky",
        style: "vampire",
        animation: "dark",
        colors: ["#8b0000", "#2f1b14", "#000000"],
    },
    Avatar {
        id: "cat-cute",
        name: "Cute Cat",
        category: "Pets",
        style: "animal",
        animation: "purr",
        colors: ["#ff6b6b", "#ffa502", "#ff6348"],
    },
    Avatar {
        id: "dog-loyal",
        name: "Loyal Dog",
        category: "Pets",
        style: "animal",
        animation: "wag",
        colors: ["#8b4513", "#cd853f", "#daa520"],
    },
    Avatar {
        id: "panda-zen",
        name: "Zen Panda",
        category: "Pets",
        style: "animal",
        animation: "zen",
        colors: ["#000000", "#ffffff", "#808080"],
    },
    Avatar {
        id: "dragon-pet",
        name: "Pet Dragon",
        category: "Fantasy",
        style: "dragon",
        animation: "fly",
        colors: ["#ff4757", "#2ed573", "#1e90ff"],
    },
    Avatar {
        id: "unicorn-magic",
        name: "Magic Unicorn",
        category: "Fantasy",
        style: "unicorn",
        animation: "sparkle",
        colors: ["#ff9ff3", "#54a0ff", "#5f27cd"],
    },
    Avatar {
        id: "happy-smile",
        name: "Happy Smile",
        category: "Mood",
        style: "emoji",
        animation: "smile",
        colors: ["#ffd700", "#ff6b6b", "#4ecdc4"],
    },
    Avatar {
        id: "sleepy-tired",
        name: "Sleepy Tired",
        category: "Mood",
        style: "emoji",
        animation: "sleep",
        colors: ["#6c5ce7", "#a29bfe", "#fd79a8"],
    },
    Avatar {
        id: "angry-fire",
        name: "Angry Fire",
        category: "Mood",
        style: "emoji",
        animation: "rage",
        colors: ["#ff4757", "#ff3838", "#ff6b6b"],
    },
    Avatar {
        id: "love-heart",
        name: "Love Heart",
        category: "Mood",
        style: "emoji",
        animation: "heart",
        colors: ["#ff6b9d", "#c44569", "#f8b500"],
    },
    Avatar {
        id: "cool-sunglasses",
        name: "Cool Sunglasses",
        category: "Mood",
        style: "emoji",
        animation: "cool",
        colors: ["#000000", "#1e90ff", "#00ff00"],
    },
];
