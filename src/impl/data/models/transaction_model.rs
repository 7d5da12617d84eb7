use fractic_server_error::ServerError;

use crate::{
    entities::{Transaction, TransactionType},
    errors::UnknownKey,
};

use super::iso_date_model::ISODateModel;

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionModel {
    pub(crate) id: String,
    #[serde(rename = "type")]
    pub(crate) transaction_type: String,
    pub(crate) amount: f64,
    pub(crate) date: ISODateModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
}

impl TryFrom<TransactionModel> for Transaction {
    type Error = ServerError;

    fn try_from(model: TransactionModel) -> Result<Self, Self::Error> {
        let transaction_type = TransactionType::from_key(&model.transaction_type)
            .ok_or_else(|| UnknownKey::new("transaction type", &model.transaction_type))?;
        Ok(Transaction {
            id: model.id.into(),
            transaction_type,
            amount: model.amount,
            date: model.date.into(),
            source: model.source,
            category: model.category,
            description: model.description,
            tags: model.tags,
        })
    }
}

impl From<&Transaction> for TransactionModel {
    fn from(t: &Transaction) -> Self {
        TransactionModel {
            id: t.id.to_string(),
            transaction_type: t.transaction_type.key().to_string(),
            amount: t.amount,
            date: t.date.into(),
            source: t.source.clone(),
            category: t.category.clone(),
            description: t.description.clone(),
            tags: t.tags.clone(),
        }
    }
}
