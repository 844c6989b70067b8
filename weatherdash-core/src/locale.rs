//! Localised string tables.
//!
//! Each locale owns one [`Catalog`]; classifiers index into it by bucket
//! instead of branching per language.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Korean,
    English,
}

impl Locale {
    /// Parse an upstream `lang` code. Anything that is not Korean falls back to English.
    pub fn from_lang(lang: &str) -> Self {
        match lang.to_ascii_lowercase().as_str() {
            "kr" | "ko" | "ko-kr" => Locale::Korean,
            _ => Locale::English,
        }
    }

    /// The `lang` value forwarded to the provider.
    pub fn lang_code(&self) -> &'static str {
        match self {
            Locale::Korean => "kr",
            Locale::English => "en",
        }
    }

    pub fn catalog(&self) -> &'static Catalog {
        match self {
            Locale::Korean => &KOREAN,
            Locale::English => &ENGLISH,
        }
    }
}

#[derive(Debug)]
pub struct Catalog {
    /// One message per outfit band, coldest first.
    pub outfit: [&'static str; 6],
    pub outfit_heading: &'static str,
    pub wet_suffix: &'static str,
    pub snow_suffix: &'static str,
    pub storm_suffix: &'static str,
    pub mask_suffix: &'static str,
    pub air_advisory_suffix: &'static str,
    /// (label, description) per AQI level 1..=5.
    pub aqi: [(&'static str, &'static str); 5],
    pub labels: Labels,
    pub errors: ErrorMessages,
}

#[derive(Debug)]
pub struct Labels {
    pub humidity: &'static str,
    pub wind: &'static str,
    pub air_quality: &'static str,
    pub outlook: &'static str,
    pub hourly: &'static str,
    pub no_forecast: &'static str,
    pub no_air_data: &'static str,
    pub last_updated: &'static str,
    pub recent: &'static str,
    pub hour_suffix: &'static str,
}

#[derive(Debug)]
pub struct ErrorMessages {
    pub city_not_found: &'static str,
    pub current_failed: &'static str,
    pub current_by_coords_failed: &'static str,
    pub forecast_failed: &'static str,
    pub forecast_by_coords_failed: &'static str,
    pub air_failed: &'static str,
    pub empty_city: &'static str,
}

static KOREAN: Catalog = Catalog {
    outfit: [
        "두꺼운 패딩, 목도리, 장갑 필수! 가능한 한 많이 껴입으세요.",
        "코트나 두꺼운 점퍼 + 니트 조합 추천. 바람 불면 더 춥게 느껴져요.",
        "가벼운 코트, 자켓, 맨투맨 정도면 적당해요.",
        "셔츠나 얇은 긴팔, 가벼운 후드티 정도면 좋아요.",
        "반팔 + 얇은 바지/치마 추천. 햇빛 강하면 모자도 챙기세요.",
        "매우 덥습니다! 최대한 시원하게 입고, 물 자주 드세요.",
    ],
    outfit_heading: "오늘 뭐 입지?",
    wet_suffix: " 비가 오니 우산이나 방수 외투를 챙기세요.",
    snow_suffix: " 눈길이 미끄러우니 미끄럼 방지 신발을 추천합니다.",
    storm_suffix: " 뇌우가 있으니 외출 시 각별히 주의하세요.",
    mask_suffix: " 공기질이 나쁘니 외출 시 마스크를 꼭 착용하세요.",
    air_advisory_suffix: " 민감하다면 마스크를 챙기는 것이 좋아요.",
    aqi: [
        ("매우 좋음", "공기가 매우 깨끗한 상태입니다."),
        ("좋음", "대체로 공기가 좋은 편입니다."),
        ("보통", "민감군이 아니라면 대부분 활동에 무리가 없습니다."),
        ("나쁨", "호흡기/심장 질환자는 실외 활동을 줄이는 것이 좋습니다."),
        ("매우 나쁨", "가능하면 실내에 머무르고, 실외 활동을 피하세요."),
    ],
    labels: Labels {
        humidity: "습도",
        wind: "풍속",
        air_quality: "공기질 / 미세먼지",
        outlook: "3일 예보",
        hourly: "향후 24시간 기온",
        no_forecast: "예보 데이터가 없습니다.",
        no_air_data: "공기질 데이터를 가져오지 못했습니다.",
        last_updated: "마지막 업데이트",
        recent: "최근 검색",
        hour_suffix: "시",
    },
    errors: ErrorMessages {
        city_not_found: "해당 도시를 찾을 수 없습니다. 철자를 다시 확인해주세요.",
        current_failed: "현재 날씨 정보를 가져오지 못했습니다.",
        current_by_coords_failed: "현재 위치의 날씨 정보를 가져오지 못했습니다.",
        forecast_failed: "예보 정보를 가져오지 못했습니다.",
        forecast_by_coords_failed: "현재 위치의 예보 정보를 가져오지 못했습니다.",
        air_failed: "공기질 정보를 가져오지 못했습니다.",
        empty_city: "도시 이름을 입력해주세요.",
    },
};

static ENGLISH: Catalog = Catalog {
    outfit: [
        "Heavy parka, scarf and gloves are a must. Layer up as much as you can.",
        "A coat or thick jacket over a knit. Wind will make it feel colder.",
        "A light coat, jacket or sweatshirt should be about right.",
        "A shirt, thin long sleeves or a light hoodie will do.",
        "Short sleeves with light trousers or a skirt. Bring a hat if it's sunny.",
        "Very hot! Dress as cool as you can and drink water often.",
    ],
    outfit_heading: "What to wear today?",
    wet_suffix: " It's raining, so bring an umbrella or a waterproof layer.",
    snow_suffix: " Roads may be slippery, non-slip shoes are recommended.",
    storm_suffix: " Thunderstorms expected, take extra care outdoors.",
    mask_suffix: " Air quality is poor, wear a mask when you go out.",
    air_advisory_suffix: " If you are sensitive, consider bringing a mask.",
    aqi: [
        ("Very good", "The air is very clean."),
        ("Good", "Air quality is generally good."),
        ("Moderate", "Most activities are fine unless you are in a sensitive group."),
        ("Poor", "People with heart or lung conditions should reduce outdoor activity."),
        ("Very poor", "Stay indoors if possible and avoid outdoor activity."),
    ],
    labels: Labels {
        humidity: "Humidity",
        wind: "Wind",
        air_quality: "Air quality / particulates",
        outlook: "3-day outlook",
        hourly: "Next 24 hours",
        no_forecast: "No forecast data available.",
        no_air_data: "Could not load air quality data.",
        last_updated: "Last updated",
        recent: "Recent searches",
        hour_suffix: "h",
    },
    errors: ErrorMessages {
        city_not_found: "City not found. Please check the spelling.",
        current_failed: "Could not load the current weather.",
        current_by_coords_failed: "Could not load the weather for your location.",
        forecast_failed: "Could not load the forecast.",
        forecast_by_coords_failed: "Could not load the forecast for your location.",
        air_failed: "Could not load air quality data.",
        empty_city: "Please enter a city name.",
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_codes_map_to_locales() {
        assert_eq!(Locale::from_lang("kr"), Locale::Korean);
        assert_eq!(Locale::from_lang("KO"), Locale::Korean);
        assert_eq!(Locale::from_lang("en"), Locale::English);
        assert_eq!(Locale::from_lang("fr"), Locale::English);
    }

    #[test]
    fn lang_code_roundtrips() {
        for locale in [Locale::Korean, Locale::English] {
            assert_eq!(Locale::from_lang(locale.lang_code()), locale);
        }
    }

    #[test]
    fn every_catalog_entry_is_filled() {
        for locale in [Locale::Korean, Locale::English] {
            let catalog = locale.catalog();
            assert!(catalog.outfit.iter().all(|m| !m.is_empty()));
            assert!(catalog.aqi.iter().all(|(l, d)| !l.is_empty() && !d.is_empty()));
        }
    }
}
