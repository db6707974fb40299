//! HTTP client of the finance REST API.
//!
//! Reads are cached per [`ViewKey`] and dropped when a [`WriteRequest`]
//! declares them stale. The engine never talks to the network: the client
//! fetches a [`Snapshot`] and hands it over.

use std::sync::{Arc, Mutex, PoisonError};

use api_types::{
    auth::{Token, UserCreate, UserLogin, UserOut},
    bank::BankOut,
    category::CategoryOut,
    credit_card::CreditCardOut,
    dashboard::{DashboardSummary, PeriodQuery},
    recurring::RecurringOut,
    transaction::TransactionOut,
    vault::VaultOut,
};
use engine::{Currency, Period, ResultEngine, Snapshot};
use reqwest::{Method, RequestBuilder, Url};
use serde::{Deserialize, de::DeserializeOwned};

pub use credentials::Credentials;
pub use error::{ClientError, Result};
pub use requests::{WriteOutcome, WriteRequest};
pub use views::{ViewCache, ViewGroup, ViewKey};

pub mod convert;
mod credentials;
mod error;
mod requests;
mod views;

/// FastAPI error body. `detail` is a string for handled errors and a list
/// of field errors for request validation failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
    credentials: Credentials,
    cache: Arc<Mutex<ViewCache>>,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_credentials(base_url, Credentials::new())
    }

    pub fn with_credentials(base_url: &str, credentials: Credentials) -> Result<Self> {
        Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            credentials,
            cache: Arc::new(Mutex::new(ViewCache::default())),
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match self.credentials.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn with_cache<T>(&self, f: impl FnOnce(&mut ViewCache) -> T) -> T {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cache)
    }

    /// Sends `req` and returns the raw success body.
    async fn send(&self, req: RequestBuilder) -> Result<Vec<u8>> {
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.bytes().await?.to_vec());
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(ErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) => "server error".to_string(),
        };

        if status.as_u16() == 401 {
            tracing::warn!("session rejected by the server, clearing credentials");
            self.credentials.clear();
            self.with_cache(ViewCache::clear);
        }

        Err(ClientError::from_status(status.as_u16(), message))
    }

    /// Reads a view, serving it from the cache when present.
    async fn view<T: DeserializeOwned>(
        &self,
        key: ViewKey,
        path: &str,
        period: Option<Period>,
    ) -> Result<T> {
        let (cached, generation) =
            self.with_cache(|cache| (cache.get(&key).cloned(), cache.generation()));
        if let Some(cached) = cached {
            tracing::debug!(?key, "view served from cache");
            return Ok(serde_json::from_value(cached)?);
        }

        let mut req = self.request(Method::GET, path);
        if let Some(period) = period {
            period.validate()?;
            req = req.query(&PeriodQuery {
                month: period.month,
                year: period.year,
            });
        }

        let body = self.send(req).await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        let parsed = T::deserialize(&value)?;
        if !self.with_cache(|cache| cache.insert_if_current(key, value, generation)) {
            tracing::debug!(?key, "view invalidated while in flight, not cached");
        }
        Ok(parsed)
    }

    /// Logs in and stores the returned token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Token> {
        let payload = UserLogin {
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = self
            .send(self.http.post(self.url("/auth/login")).json(&payload))
            .await?;
        let token: Token = serde_json::from_slice(&body)?;

        self.credentials.set(token.access_token.clone());
        self.with_cache(ViewCache::clear);
        tracing::info!(email, "logged in");
        Ok(token)
    }

    pub async fn register(&self, payload: &UserCreate) -> Result<UserOut> {
        let body = self
            .send(self.http.post(self.url("/auth/register")).json(payload))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Forgets the token and every cached view.
    pub fn logout(&self) {
        self.credentials.clear();
        self.with_cache(ViewCache::clear);
        tracing::info!("logged out");
    }

    pub async fn list_banks(&self) -> Result<Vec<BankOut>> {
        self.view(ViewKey::all(ViewGroup::Banks), "/banks/", None)
            .await
    }

    pub async fn list_vaults(&self) -> Result<Vec<VaultOut>> {
        self.view(ViewKey::all(ViewGroup::Vaults), "/vaults/", None)
            .await
    }

    pub async fn list_credit_cards(&self) -> Result<Vec<CreditCardOut>> {
        self.view(ViewKey::all(ViewGroup::CreditCards), "/credit-cards/", None)
            .await
    }

    pub async fn list_recurring(&self) -> Result<Vec<RecurringOut>> {
        self.view(ViewKey::all(ViewGroup::Recurring), "/recurring/", None)
            .await
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryOut>> {
        self.view(ViewKey::all(ViewGroup::Categories), "/categories/", None)
            .await
    }

    /// Transactions dated inside `period`, newest first.
    pub async fn list_transactions(&self, period: Period) -> Result<Vec<TransactionOut>> {
        self.view(
            ViewKey::for_period(ViewGroup::Transactions, period),
            "/transactions/",
            Some(period),
        )
        .await
    }

    /// Server-side totals of `period`.
    pub async fn dashboard_summary(&self, period: Period) -> Result<DashboardSummary> {
        self.view(
            ViewKey::for_period(ViewGroup::Dashboard, period),
            "/dashboard/summary",
            Some(period),
        )
        .await
    }

    /// CSV export of `period`. Never cached.
    pub async fn export_csv(&self, period: Period) -> Result<String> {
        period.validate()?;
        let req = self
            .request(Method::GET, "/reports/export/csv")
            .query(&PeriodQuery {
                month: period.month,
                year: period.year,
            });
        let body = self.send(req).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Sends a write and drops the views it makes stale.
    pub async fn execute(&self, request: WriteRequest) -> Result<WriteOutcome> {
        let mut req = self.request(request.method(), &request.path());
        if let Some(body) = request.body()? {
            req = req.json(&body);
        }

        let body = self.send(req).await?;
        let outcome = request.outcome(&body)?;

        let keys = request.invalidates();
        let dropped = self.with_cache(|cache| cache.invalidate(&keys));
        tracing::info!(method = %request.method(), path = %request.path(), dropped, "write applied");
        Ok(outcome)
    }

    /// Fetches every entity the dashboard needs for `period` concurrently
    /// and converts them into engine types.
    pub async fn fetch_snapshot(&self, period: Period, primary: Currency) -> Result<Snapshot> {
        period.validate()?;
        let (banks, vaults, credit_cards, transactions, recurring, categories) = tokio::try_join!(
            self.list_banks(),
            self.list_vaults(),
            self.list_credit_cards(),
            self.list_transactions(period),
            self.list_recurring(),
            self.list_categories(),
        )?;

        let snapshot = Snapshot {
            period,
            banks: collect(banks, |row| convert::bank(row, primary))?,
            vaults: collect(vaults, convert::vault)?,
            credit_cards: collect(credit_cards, |row| convert::credit_card(row, primary))?,
            transactions: collect(transactions, |row| convert::transaction(row, primary))?,
            recurring: collect(recurring, |row| convert::recurring(row, primary))?,
            categories: categories.into_iter().map(convert::category).collect(),
        };
        Ok(snapshot)
    }
}

fn collect<T, U>(rows: Vec<T>, f: impl FnMut(T) -> ResultEngine<U>) -> Result<Vec<U>> {
    Ok(rows.into_iter().map(f).collect::<ResultEngine<Vec<U>>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            Client::new("not a url"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn joins_paths_without_double_slashes() {
        let client = Client::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/banks/"), "http://localhost:8000/banks/");
        assert_eq!(client.url("banks/1"), "http://localhost:8000/banks/1");
    }
}
