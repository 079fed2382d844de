use std::sync::OnceLock;
use mongodb::{ Client, Database };

static CLIENT: OnceLock<Client> = OnceLock::new();

pub struct MongoDB;

impl MongoDB {
    /* Must run once at startup, before any connect() */
    pub async fn init(&self) -> mongodb::error::Result<()> {
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let client = Client::with_uri_str(&uri).await?;
        let _ = CLIENT.set(client);

        Ok(())
    }

    pub fn connect(&self) -> Database {
        let client = CLIENT.get()
            .expect("MongoDB.init must run before connect");

        let name = std::env::var("MONGODB_DB")
            .unwrap_or_else(|_| "adrdub".to_string());

        client.database(&name)
    }
}
