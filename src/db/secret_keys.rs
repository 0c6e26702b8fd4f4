use sqlx::PgConnection;

#[async_trait::async_trait]
pub trait SecretKeyProvider {
    async fn valid_secret_key(&mut self, secret_key: &str) -> Result<bool, sqlx::Error>;
}

#[async_trait::async_trait]
impl SecretKeyProvider for PgConnection {
    async fn valid_secret_key(&mut self, secret_key: &str) -> Result<bool, sqlx::Error> {
        let (valid,): (bool,) = sqlx::query_as(
            r#"
                SELECT EXISTS (
                    SELECT
                        1
                    FROM
                        secret_keys
                    WHERE
                        secret_key = $1
                )
            "#,
        )
        .bind(secret_key)
        .fetch_one(self)
        .await?;

        Ok(valid)
    }
}
