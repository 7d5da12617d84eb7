use crate::entities::CustomQuote;

use super::timestamp_model::TimestampModel;

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomQuoteModel {
    pub(crate) id: String,
    pub(crate) text: String,
    pub(crate) author: String,
    pub(crate) date_added: TimestampModel,
}

impl From<CustomQuoteModel> for CustomQuote {
    fn from(model: CustomQuoteModel) -> Self {
        CustomQuote {
            id: model.id.into(),
            text: model.text,
            author: model.author,
            date_added: model.date_added.into(),
        }
    }
}

impl From<&CustomQuote> for CustomQuoteModel {
    fn from(q: &CustomQuote) -> Self {
        CustomQuoteModel {
            id: q.id.to_string(),
            text: q.text.clone(),
            author: q.author.clone(),
            date_added: q.date_added.into(),
        }
    }
}
