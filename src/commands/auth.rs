use anyhow::Result;
use bronto_client::AuthStore;

pub async fn register(username: &str, password: &str) -> Result<()> {
    let mut store = AuthStore::new(super::api()?);

    let user = store.register(username, password).await?;

    println!("Registered and logged in as {} ({})", user.username, user.id);
    Ok(())
}

pub async fn login(username: &str, password: &str) -> Result<()> {
    let mut store = AuthStore::new(super::api()?);

    let user = store.login(username, password).await?;

    println!("Logged in as {} ({})", user.username, user.id);
    Ok(())
}

pub async fn logout() -> Result<()> {
    let mut store = AuthStore::new(super::api()?);

    store.logout().await?;

    println!("Logged out.");
    Ok(())
}
