use super::models::ScoreHistory;
use super::Db;

impl Db {
    /// Every user's score history, in no particular order.
    pub async fn score_histories(&self) -> Vec<ScoreHistory> {
        self.store
            .read()
            .await
            .users
            .iter()
            .map(|(username, user)| ScoreHistory {
                username: username.clone(),
                scores: user.scores.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn histories_include_users_without_scores() {
        let db = Db::new();
        db.create_user("ada", "pw").await.unwrap();
        db.create_user("bob", "pw").await.unwrap();
        db.record_score("ada", 4).await.unwrap();

        let mut histories = db.score_histories().await;
        histories.sort_by(|a, b| a.username.cmp(&b.username));

        assert_eq!(histories.len(), 2);
        assert_eq!(histories[0].scores, vec![4]);
        assert!(histories[1].scores.is_empty());
    }
}
