use crate::model::{TimeSnapshot, WeatherReading};

/// Literal markdown template the model is told to fill in.
const FORMAT_INSTRUCTION: &str = "출력 형식은 다음과 같이 출력해. 1. 시간에 어울리는 음식 추천 문구를 {suggestedFoodText}에 점심이면 \"오늘의 점메추는\" 저녁이면 \"오늘의 저메추는\"으로 시작해서 이어서 작성해. 2. {weatherCondition}에는 현재 날씨를 문구로 나타내. 3. 위의 내용을 참고해서 다음 마크다운 문법으로 출력해. # 오늘 뭐 먹지?</br>yyyy년 d월 d일 {hour}시 {minutes}분 {location}의 날씨는 {temperature}℃이고, {weatherCondition}. {suggestedFoodText}</br>1. **메뉴명1**: 이유1</br>2. **메뉴명2**: 이유2</br>3. **메뉴명3**: 이유3</br>";

/// Two-part prompt: what to recommend, then how to format it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub content: String,
    pub format: String,
}

impl Prompt {
    pub fn new(location: &str, time: &TimeSnapshot, weather: &WeatherReading) -> Self {
        let content = format!(
            "오늘 {}.년{}월.{}일 {}시 {}분 {}의 날씨는 {}이고 온도는 {}도야. \
             오늘은 {}요일이야(요일 번호 {}, 0은 일요일). \
             날씨와 계절 그리고 시간을 고려해서 배달시켜 먹기 좋은 식사 메뉴 3가지를 다양하게 추천하고 \
             메뉴명과 함께 간단한 추천 이유를 작성해.",
            time.year,
            time.month,
            time.date,
            time.hour,
            time.min,
            location,
            weather.condition,
            weather.temperature,
            time.weekday_ko(),
            time.day,
        );

        Self {
            content,
            format: FORMAT_INSTRUCTION.to_string(),
        }
    }

    pub fn parts(&self) -> [&str; 2] {
        [&self.content, &self.format]
    }
}
