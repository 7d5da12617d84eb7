use crate::entities::Goal;

use super::iso_date_model::ISODateModel;

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoalModel {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) target_amount: f64,
    #[serde(default)]
    pub(crate) current_amount: f64,
    pub(crate) deadline: ISODateModel,
}

impl From<GoalModel> for Goal {
    fn from(model: GoalModel) -> Self {
        Goal {
            id: model.id.into(),
            title: model.title,
            target_amount: model.target_amount,
            current_amount: model.current_amount,
            deadline: model.deadline.into(),
        }
    }
}

impl From<&Goal> for GoalModel {
    fn from(g: &Goal) -> Self {
        GoalModel {
            id: g.id.to_string(),
            title: g.title.clone(),
            target_amount: g.target_amount,
            current_amount: g.current_amount,
            deadline: g.deadline.into(),
        }
    }
}
