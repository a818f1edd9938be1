// Output sizes, visual styles and colour presets offered to the generator

use serde::Serialize;
use std::fmt;

/// Aspect ratios accepted by the image model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "9:16")]
    Tall,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Tall => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An output format the user can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeOption {
    pub id: &'static str,
    pub ratio: AspectRatio,
    /// Layout instruction added to the prompt; empty when the ratio says enough
    pub instruction: &'static str,
}

pub const DEFAULT_SIZE_ID: &str = "presentation-wide";

pub static SIZE_OPTIONS: &[SizeOption] = &[
    SizeOption {
        id: "mobile-story",
        ratio: AspectRatio::Tall,
        instruction: "Format: Mobile Fullscreen (9:16). Large text, mobile optimized.",
    },
    SizeOption {
        id: "webtoon-4",
        ratio: AspectRatio::Tall,
        instruction: "Format: 4-Cut Webtoon (Vertical Strip). Create a vertical comic strip with exactly 4 distinct panels/frames. Focus on sequential storytelling.",
    },
    SizeOption {
        id: "webtoon-8",
        ratio: AspectRatio::Tall,
        instruction: "Format: 8-Cut Webtoon (Long Vertical Strip). Create a long vertical comic strip with approximately 8 distinct panels/frames. Focus on detailed sequential storytelling.",
    },
    SizeOption {
        id: "long-scroll",
        ratio: AspectRatio::Tall,
        instruction: "Format: Long Scrolling Vertical. Organize content vertically like a webtoon.",
    },
    SizeOption {
        id: "instagram-sq",
        ratio: AspectRatio::Square,
        instruction: "",
    },
    SizeOption {
        id: "card-news",
        ratio: AspectRatio::Square,
        instruction: "Format: Social Media Card. Bold text, square layout, carousel style.",
    },
    SizeOption {
        id: "presentation-wide",
        ratio: AspectRatio::Wide,
        instruction: "",
    },
    SizeOption {
        id: "presentation-std",
        ratio: AspectRatio::Standard,
        instruction: "",
    },
    SizeOption {
        id: "a4-portrait",
        ratio: AspectRatio::Portrait,
        instruction: "Format: A4 Paper (Portrait). Layout for standard document print.",
    },
    SizeOption {
        id: "a4-landscape",
        ratio: AspectRatio::Standard,
        instruction: "Format: A4 Paper (Landscape). Layout for wide document print.",
    },
];

pub fn find_size(id: &str) -> Option<&'static SizeOption> {
    SIZE_OPTIONS.iter().find(|size| size.id == id)
}

/// Aspect ratio for a size id; unknown ids fall back to portrait
pub fn aspect_ratio(size_id: &str) -> AspectRatio {
    find_size(size_id)
        .map(|size| size.ratio)
        .unwrap_or(AspectRatio::Portrait)
}

/// Layout instruction for a size id, empty when there is none
pub fn size_instruction(size_id: &str) -> &'static str {
    find_size(size_id).map(|size| size.instruction).unwrap_or("")
}

/// A named visual style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfographicStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Style id meaning "copy the reference image"
pub const CUSTOM_STYLE_ID: &str = "custom";

pub const DEFAULT_STYLE_ID: &str = "dynamic-glassmorphism";

const CUSTOM_STYLE: InfographicStyle = InfographicStyle {
    id: CUSTOM_STYLE_ID,
    name: "Custom",
    description: "Match the reference image style.",
};

pub static INFOGRAPHIC_STYLES: &[InfographicStyle] = &[
    // Historical eras, in chronological order
    InfographicStyle {
        id: "paleolithic",
        name: "구석기 시대 (Paleolithic)",
        description: "동굴 벽화와 원시적인 그림체로 표현하는 태초의 스타일",
    },
    InfographicStyle {
        id: "ancient-egypt",
        name: "고대 이집트 (Ancient Egypt)",
        description: "파라오와 피라미드, 히에로글리프가 어우러진 신비로운 스타일",
    },
    InfographicStyle {
        id: "spring-autumn-warring",
        name: "중국 춘추전국시대 (Spring & Autumn)",
        description: "청동기와 죽간, 제자백가의 사상이 담긴 고대 중국 스타일",
    },
    InfographicStyle {
        id: "ancient-greece-rome",
        name: "고대 그리스/로마 (Classical)",
        description: "대리석 기둥과 월계관, 클래식한 조각상 스타일의 고전주의",
    },
    InfographicStyle {
        id: "medieval-europe",
        name: "유럽 중세시대 (Medieval)",
        description: "기사와 성, 스테인드글라스와 문장(紋章)이 어우러진 중세 판타지",
    },
    InfographicStyle {
        id: "renaissance",
        name: "르네상스 (Renaissance)",
        description: "레오나르도 다빈치 스케치와 미켈란젤로 프레스코화 스타일",
    },
    InfographicStyle {
        id: "joseon-dynasty",
        name: "조선시대 (Joseon Dynasty)",
        description: "민화와 한지, 붓글씨가 어우러진 동양적 고전미",
    },
    InfographicStyle {
        id: "industrial-revolution",
        name: "영국 산업혁명 (Industrial Revolution)",
        description: "증기기관과 톱니바퀴, 빅토리아 시대의 스팀펑크 감성",
    },
    InfographicStyle {
        id: "american-frontier",
        name: "미국 개척시대 (American Frontier)",
        description: "서부 카우보이와 황야, 골드러시 시대의 거친 낭만",
    },
    // Contemporary design styles
    InfographicStyle {
        id: "dynamic-glassmorphism",
        name: "Dynamic Glassmorphism",
        description: "반투명한 유리 카드 뒤에서 은은한 오로라 같은 컬러가 움직이는 생동감 있는 스타일",
    },
    InfographicStyle {
        id: "noise-texture",
        name: "Noise Texture Overlay",
        description: "미묘한 필름 그레인 질감을 깔아 종이 인쇄물 같은 고급스러운 촉감을 전달",
    },
    InfographicStyle {
        id: "minimalism",
        name: "Minimalism",
        description: "여백의 미를 살린 깔끔하고 세련된 스타일. 본질에 집중",
    },
    InfographicStyle {
        id: "bento-grid",
        name: "Bento Grid",
        description: "도시락 통처럼 정보를 직관적인 박스 형태로 배치하여 구조적이고 모던한 느낌",
    },
    InfographicStyle {
        id: "cyberpunk",
        name: "Cyberpunk/Dark",
        description: "검정 배경에 형광색 포인트(네온)를 사용하여 미래지향적이고 강렬한 인상",
    },
    InfographicStyle {
        id: "typography",
        name: "Typography-driven",
        description: "굵고 큰 폰트를 과감하게 사용하여 텍스트 자체로 메시지를 강력하게 전달",
    },
    InfographicStyle {
        id: "parallax",
        name: "Parallax Layered",
        description: "깊이감과 입체적인 몰입감을 제공하는 레이어드 스타일",
    },
    InfographicStyle {
        id: "neumorphism",
        name: "Neumorphism",
        description: "요소가 배경에서 부드럽게 튀어나오거나 들어간 듯한 소프트 UI 스타일",
    },
    InfographicStyle {
        id: "brutalism",
        name: "Brutalism",
        description: "거칠고 투박하며 파격적인 레이아웃으로 예술적이고 힙한 느낌",
    },
    InfographicStyle {
        id: "isometric",
        name: "Isometric 3D",
        description: "3차원 입체 투시를 활용하여 귀엽고 트렌디하며 공간감을 살린 디자인",
    },
    InfographicStyle {
        id: "retro-futurism",
        name: "Retro Futurism",
        description: "80-90년대에 상상했던 미래의 느낌과 현대적인 감각을 결합한 힙한 스타일",
    },
    InfographicStyle {
        id: "gamification",
        name: "Gamification",
        description: "게임 요소(배지, 레벨, 진행바)를 활용하여 흥미를 유도하는 즐거운 스타일",
    },
    InfographicStyle {
        id: "ai-digital",
        name: "AI DIGITAL",
        description: "신경망, 노드 연결, 빛나는 입자 효과를 사용하여 인공지능의 느낌 강조",
    },
    InfographicStyle {
        id: "apple",
        name: "Apple Style",
        description: "극도의 심플함, 고해상도 이미지, 부드러운 여백이 특징인 프리미엄 스타일",
    },
    InfographicStyle {
        id: "samsung",
        name: "Samsung Galaxy",
        description: "깊은 블랙 배경에 선명한 홀로그래픽 그래픽과 엣지있는 폰트",
    },
    InfographicStyle {
        id: "google",
        name: "Google Style",
        description: "Material Design 3 기반의 둥근 모서리, 파스텔 톤과 원색의 조화",
    },
    InfographicStyle {
        id: "nvidia",
        name: "Nvidia Style",
        description: "검정 배경에 시그니처 그린 컬러와 기하학적 패턴을 사용한 하드웨어적 느낌",
    },
];

pub fn find_style(id: &str) -> Option<&'static InfographicStyle> {
    INFOGRAPHIC_STYLES.iter().find(|style| style.id == id)
}

/// The style to describe in the prompt; unknown ids (including `custom`)
/// resolve to the reference-image style
pub fn resolve_style(id: &str) -> &'static InfographicStyle {
    find_style(id).unwrap_or(&CUSTOM_STYLE)
}

/// A colour preset; `value` is a hex code or a tone name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub id: &'static str,
    pub name: &'static str,
    pub value: &'static str,
}

pub static COLOR_OPTIONS: &[ColorOption] = &[
    ColorOption { id: "red", name: "Red", value: "#ef4444" },
    ColorOption { id: "orange", name: "Orange", value: "#f97316" },
    ColorOption { id: "yellow", name: "Yellow", value: "#facc15" },
    ColorOption { id: "green", name: "Green", value: "#22c55e" },
    ColorOption { id: "teal", name: "Teal", value: "#14b8a6" },
    ColorOption { id: "blue", name: "Blue", value: "#3b82f6" },
    ColorOption { id: "indigo", name: "Indigo", value: "#6366f1" },
    ColorOption { id: "purple", name: "Purple", value: "#a855f7" },
    ColorOption { id: "pink", name: "Pink", value: "#ec4899" },
    ColorOption { id: "rose", name: "Rose", value: "#f43f5e" },
    ColorOption { id: "brown", name: "Brown", value: "#92400e" },
    ColorOption { id: "slate", name: "Slate", value: "#64748b" },
    ColorOption { id: "black", name: "Black", value: "#000000" },
    ColorOption { id: "white", name: "White", value: "#ffffff" },
    ColorOption { id: "warm", name: "Warm", value: "Warm Tone" },
    ColorOption { id: "cool", name: "Cool", value: "Cool Tone" },
];

/// Map a preset id or name to its value; anything else passes through
pub fn resolve_color(input: &str) -> String {
    let input = input.trim();
    COLOR_OPTIONS
        .iter()
        .find(|color| color.id.eq_ignore_ascii_case(input) || color.name.eq_ignore_ascii_case(input))
        .map(|color| color.value.to_string())
        .unwrap_or_else(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_aspect_ratios() {
        assert_eq!(aspect_ratio("mobile-story"), AspectRatio::Tall);
        assert_eq!(aspect_ratio("card-news"), AspectRatio::Square);
        assert_eq!(aspect_ratio("presentation-wide").as_str(), "16:9");
        assert_eq!(aspect_ratio("a4-landscape").as_str(), "4:3");
        assert_eq!(aspect_ratio("a4-portrait").as_str(), "3:4");
        assert_eq!(aspect_ratio("billboard"), AspectRatio::Portrait);
    }

    #[test]
    fn test_size_instructions() {
        assert!(size_instruction("webtoon-4").contains("exactly 4 distinct panels"));
        assert_eq!(size_instruction("instagram-sq"), "");
        assert_eq!(size_instruction("unknown"), "");
        assert_eq!(SIZE_OPTIONS.len(), 10);
        assert!(find_size(DEFAULT_SIZE_ID).is_some());
    }

    #[test]
    fn test_style_catalog() {
        let ids: HashSet<_> = INFOGRAPHIC_STYLES.iter().map(|style| style.id).collect();
        assert_eq!(ids.len(), INFOGRAPHIC_STYLES.len());
        assert!(find_style(DEFAULT_STYLE_ID).is_some());
        assert_eq!(resolve_style("bento-grid").name, "Bento Grid");
    }

    #[test]
    fn test_custom_style_fallback() {
        for id in [CUSTOM_STYLE_ID, "does-not-exist"] {
            let style = resolve_style(id);
            assert_eq!(style.name, "Custom");
            assert_eq!(style.description, "Match the reference image style.");
        }
    }

    #[test]
    fn test_resolve_color() {
        assert_eq!(resolve_color("blue"), "#3b82f6");
        assert_eq!(resolve_color("Warm"), "Warm Tone");
        assert_eq!(resolve_color("#123456"), "#123456");
        assert_eq!(resolve_color(" teal "), "#14b8a6");
    }

    #[test]
    fn test_aspect_ratio_serializes_as_ratio() {
        assert_eq!(serde_json::to_value(AspectRatio::Tall).unwrap(), "9:16");
        assert_eq!(AspectRatio::Wide.to_string(), "16:9");
    }
}
