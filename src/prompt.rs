//! 提示词模板
//!
//! 系统提示词是固定的领域规则文本，逐字保留、不做参数化；每条
//! 笔记的用户提示词由模板替换 {note} 和 {format_instructions}
//! 两个占位符生成，笔记正文用三反引号包住，不做额外转义。

/// 系统提示词（社工审阅病历笔记的领域规则，固定文本）
pub const SYSTEM_PROMPT: &str = r#"You are a social worker reviewing patient notes for social determinants of health. You are looking for patients facing housing instability. Unless the note contains explicit evidence of housing instability, or it can be obviously inferred, you cannot assume a patient is experiencing housing instability.

Here is some additional information on homelessness vs housing instability: While patients experiencing homelessness would also be classified as experiencing housing instability, people experiencing housing instability are not necessarily experiencing homelessness. Housing instability is often defined to include rent cost burden, risk of eviction, or frequent moves. Some people who are experiencing housing instability may access homeless services like meal programs, so it is important to distinguish whether an individual spent time in particular homeless service facilities or settings.

It is important to note that just because a patient is currently experiencing housing insecurity does not mean that they also experienced it in the past. Unless there are explicit or obviously inferred past references to housing insecurity, or the note is written in a way that implies the patient has been in this situation before, you cannot determine whether or not a patient has a history of housing insecurity.

If the note mentions current housing insecurity, for example, 'patient has been homeless for the past two months', this should be treated as 'current' housing insecurity and not 'history'. A patient can only experience a 'history' of housing insecurity if they had housing insecurity in the past, then were stably housed, then experienced housing insecurity again. If the note makes reference to past housing insecurity, for example, 'the patient was homeless in the past', then this can be treated as a 'history of housing insecurity'.

**Examples of stable housing:**
-Living in an apartment or home which is paid for by the patient.
-Accepted to housing and is preparing to move in.
-Permanently living with a family member or friend. 
-If no timeline is specified in the note about housing (i.e. not temporary). Examples: Lives with dad, lives with a friend.
-Patient is discharged to a hospital program with no other mention of housing. Example: eating disorder program.

**Examples of unknown:**
-There is no mention of a patient’s housing status.
-The information in the note is insufficient to make a final judgment.

**Examples of housing insecurity:**
-Living in a place not meant for human habitation. Examples: the streets, an abandoned building, a vehicle, etc.
-Recently evicted from their current residence.
-Chosen eviction due to an unstable home environment.
-Chosen or forced eviction due to their physical environment. Examples: mold, infestation, etc.
-Living in emergency housing or transitional housing. Examples: Group home, foster home.
-Temporarily staying with a family member or friend.
-Patient’s exact housing status is not explicitly stated, but it is stated that they are facing housing issues or in need of stable housing. Example: Social work consult for housing.
- Patient is worried about future housing insecurity/instability. Example: “They’re going to kick me out” "#;

/// 输出字段及其说明，按输出表列顺序排列
///
/// 说明文本会原样进入格式说明里的 JSON schema，模型按它组织回答。
pub const FIELDS: &[(&str, &str)] = &[
    (
        "Evidence",
        "Please provide all evidence of housing status and factors that may be impacting the patient's housing status from the patient note. Please provide evidence verbatim. Include all chunks of text with evidence, not just the first piece of evidence you encounter. Include any information on housing status, whether stable or unstable. Seperate each chunk of text with '\n--' and also precede the first chunk of text with '--'. If there is no evidence or housing status is unknown respond by saying \"N/A\". Do not make anything up.",
    ),
    (
        "HousingNoted",
        "Y/N <Is this patient's housing status noted in the evidence?>",
    ),
    (
        "HousingInstability_Current",
        "Y/N <Based on the evidence, is this patient currently facing housing instability?. Answer Y/N.>",
    ),
    (
        "HousingStability_Current",
        "Y/N/Unknown <Based on the evidence, is this patient stably housed? If they are currently facing housing instability then this answer is automatically \"N\". If you do not know, then answer \"Unknown\".>",
    ),
    (
        "HousingInstability_History",
        "Y/N <Based on the evidence, has this patient faced housing instability in the past, even if their current housing situation is stable?>",
    ),
    (
        "Justification",
        "Justify your responses to the questions above. If there is no evidence or no housing status noted then respond with \"N/A\".",
    ),
];

/// 用户提示词模板，{note} 与 {format_instructions} 为占位符
pub const NOTE_PROMPT_TEMPLATE: &str = "Carefully read the following patient note enclosed in triple backticks: \n```{note}``` \n Answer the following questions:\n {format_instructions}";

/// 格式说明的固定前言，{schema} 为占位符
const FORMAT_INSTRUCTIONS_TEMPLATE: &str = "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\nAs an example, for the schema {\"properties\": {\"foo\": {\"title\": \"Foo\", \"description\": \"a list of strings\", \"type\": \"array\", \"items\": {\"type\": \"string\"}}}, \"required\": [\"foo\"]}\nthe object {\"foo\": [\"bar\", \"baz\"]} is a well-formatted instance of the schema. The object {\"properties\": {\"foo\": [\"bar\", \"baz\"]}} is not well-formatted.\n\nHere is the output schema:\n```\n{schema}\n```";

/// 生成格式说明
///
/// 把字段表渲染成 JSON schema 并嵌入固定前言，明确告诉模型
/// 输出必须满足的契约（字段名、类型、字面值约束）。
pub fn format_instructions() -> String {
    let properties: Vec<String> = FIELDS
        .iter()
        .map(|(name, description)| {
            format!(
                "{}: {{\"title\": {}, \"description\": {}, \"type\": \"string\"}}",
                serde_json::Value::from(*name),
                serde_json::Value::from(*name),
                serde_json::Value::from(*description)
            )
        })
        .collect();
    let required: Vec<String> = FIELDS
        .iter()
        .map(|(name, _)| serde_json::Value::from(*name).to_string())
        .collect();
    let schema = format!(
        "{{\"properties\": {{{}}}, \"required\": [{}]}}",
        properties.join(", "),
        required.join(", ")
    );
    FORMAT_INSTRUCTIONS_TEMPLATE.replace("{schema}", &schema)
}

/// 构造单条笔记的用户提示词
///
/// # 参数
/// - `note`: 笔记正文（原样替换进模板）
///
/// # 返回
/// 返回可直接发给模型的用户消息文本
pub fn build_user_prompt(note: &str) -> String {
    NOTE_PROMPT_TEMPLATE
        .replace("{note}", note)
        .replace("{format_instructions}", &format_instructions())
}
