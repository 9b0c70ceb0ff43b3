//
// Copyright (c) 2024 Nathan Fiedler
//
use super::LIKES_TABLE;
use crate::data::sources::LikeDataSource;
use crate::domain::entities::{Like, NewLike};
use crate::Error;
use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_RANGE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use std::fmt;

/// Media type asking PostgREST for exactly one object rather than an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// PostgREST error code for a singular response that matched 0 or 2+ rows.
const NOT_SINGULAR: &str = "PGRST116";

///
/// Data source implementation backed by a hosted PostgREST service, such as
/// the REST interface of a Supabase project.
///
pub struct PostgrestLikeDataSource {
    http: Client,
    // full URL of the likes table resource
    endpoint: Url,
    api_key: String,
}

impl fmt::Debug for PostgrestLikeDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgrestLikeDataSource")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl PostgrestLikeDataSource {
    ///
    /// Construct a data source for the service at `base_url` (the project
    /// URL, without the `/rest/v1` suffix) using the given access key.
    ///
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        let mut base = Url::parse(base_url)
            .map_err(|e| Error::Configuration(format!("invalid service URL {}: {}", base_url, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(&format!("rest/v1/{}", LIKES_TABLE))
            .map_err(|e| Error::Configuration(format!("invalid service URL {}: {}", base_url, e)))?;
        let http = Client::builder()
            .user_agent(concat!("blog-likes/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.to_owned(),
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http
            .request(method, self.endpoint.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, Error> {
        let request = request.build()?;
        debug!("{} {}", request.method(), request.url());
        let res = self.http.execute(request).await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        Err(service_error(status, &body))
    }

    fn count_request(&self, post_id: &str) -> RequestBuilder {
        let filter = eq(post_id);
        self.request(Method::HEAD)
            .header("Prefer", "count=exact")
            .query(&[("select", "id"), ("post_id", filter.as_str())])
    }

    fn insert_request(&self, post_id: &str, user_id: &str) -> RequestBuilder {
        self.request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[NewLike { post_id, user_id }])
    }

    fn delete_request(&self, post_id: &str, user_id: &str) -> RequestBuilder {
        self.request(Method::DELETE)
            .header("Prefer", "return=representation")
            .query(&[("post_id", eq(post_id)), ("user_id", eq(user_id))])
    }

    fn delete_all_request(&self) -> RequestBuilder {
        // PostgREST refuses a DELETE without any filter
        self.request(Method::DELETE)
            .header("Prefer", "return=representation")
            .query(&[("id", "not.is.null")])
    }

    fn single_request(&self, post_id: &str, user_id: &str) -> RequestBuilder {
        self.request(Method::GET)
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[
                ("select", "id,post_id,user_id".to_owned()),
                ("post_id", eq(post_id)),
                ("user_id", eq(user_id)),
            ])
    }
}

#[async_trait]
impl LikeDataSource for PostgrestLikeDataSource {
    async fn count_likes(&self, post_id: &str) -> Result<u64, Error> {
        let res = self.execute(self.count_request(post_id)).await?;
        // no total in the header means nothing was counted
        let count = res
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
            .unwrap_or(0);
        Ok(count)
    }

    async fn insert_like(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error> {
        let res = self.execute(self.insert_request(post_id, user_id)).await?;
        read_json(res).await
    }

    async fn delete_likes(&self, post_id: &str, user_id: &str) -> Result<Vec<Like>, Error> {
        let res = self.execute(self.delete_request(post_id, user_id)).await?;
        read_json(res).await
    }

    async fn delete_all_likes(&self) -> Result<Vec<Like>, Error> {
        let res = self.execute(self.delete_all_request()).await?;
        read_json(res).await
    }

    async fn find_single_like(&self, post_id: &str, user_id: &str) -> Result<Like, Error> {
        let res = self.execute(self.single_request(post_id, user_id)).await?;
        read_json(res).await
    }
}

///
/// Error body returned by PostgREST.
///
#[derive(Debug, Deserialize)]
struct ServiceFault {
    message: String,
    code: Option<String>,
    details: Option<String>,
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

async fn read_json<T: serde::de::DeserializeOwned>(res: Response) -> Result<T, Error> {
    let body = res.text().await?;
    Ok(serde_json::from_str(&body)?)
}

//
// Turn an unsuccessful response into an error, keeping the service message.
//
fn service_error(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ServiceFault>(body) {
        Ok(fault) => {
            if fault.code.as_deref() == Some(NOT_SINGULAR) {
                if let Some(rows) = fault.details.as_deref().and_then(parse_row_count) {
                    return Error::NotSingleRow {
                        rows,
                        message: fault.message,
                    };
                }
            }
            Error::Service {
                status: status.as_u16(),
                message: fault.message,
            }
        }
        Err(_) => {
            let message = if body.trim().is_empty() {
                status.to_string()
            } else {
                body.trim().to_owned()
            };
            Error::Service {
                status: status.as_u16(),
                message,
            }
        }
    }
}

//
// Extract the total from a header such as "0-24/3573" or "*/0".
//
fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.split_once('/')?;
    total.trim().parse().ok()
}

//
// Find the row count in details such as "The result contains 2 rows".
//
fn parse_row_count(details: &str) -> Option<usize> {
    details
        .split(|c: char| !c.is_ascii_digit())
        .find(|s| !s.is_empty())?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_endpoint_url() -> Result<(), Error> {
        let lds = PostgrestLikeDataSource::new("https://abc.supabase.co", "anon")?;
        assert_eq!(
            lds.endpoint.as_str(),
            "https://abc.supabase.co/rest/v1/likes_for_mdx_blog_2"
        );
        let lds = PostgrestLikeDataSource::new("http://localhost:54321/proxy", "anon")?;
        assert_eq!(
            lds.endpoint.as_str(),
            "http://localhost:54321/proxy/rest/v1/likes_for_mdx_blog_2"
        );
        Ok(())
    }

    #[test]
    fn test_count_request() -> Result<(), Error> {
        let lds = PostgrestLikeDataSource::new("https://abc.supabase.co", "anon")?;
        let request = lds.count_request("hello-world").build()?;
        assert_eq!(request.method(), Method::HEAD);
        assert_eq!(request.headers()["apikey"], "anon");
        assert_eq!(request.headers()["authorization"], "Bearer anon");
        assert_eq!(request.headers()["prefer"], "count=exact");
        assert_eq!(
            query_pairs(&request),
            vec![
                ("select".to_owned(), "id".to_owned()),
                ("post_id".to_owned(), "eq.hello-world".to_owned()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_insert_request() -> Result<(), Error> {
        let lds = PostgrestLikeDataSource::new("https://abc.supabase.co", "anon")?;
        let request = lds.insert_request("hello-world", "b1f2c3").build()?;
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.headers()["prefer"], "return=representation");
        let body = request.body().and_then(|b| b.as_bytes()).unwrap_or_default();
        assert_eq!(
            body,
            &br#"[{"post_id":"hello-world","user_id":"b1f2c3"}]"#[..]
        );
        Ok(())
    }

    #[test]
    fn test_delete_requests() -> Result<(), Error> {
        let lds = PostgrestLikeDataSource::new("https://abc.supabase.co", "anon")?;
        let request = lds.delete_request("hello-world", "b1f2c3").build()?;
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(
            query_pairs(&request),
            vec![
                ("post_id".to_owned(), "eq.hello-world".to_owned()),
                ("user_id".to_owned(), "eq.b1f2c3".to_owned()),
            ]
        );
        let request = lds.delete_all_request().build()?;
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(
            query_pairs(&request),
            vec![("id".to_owned(), "not.is.null".to_owned())]
        );
        Ok(())
    }

    #[test]
    fn test_single_request() -> Result<(), Error> {
        let lds = PostgrestLikeDataSource::new("https://abc.supabase.co", "anon")?;
        let request = lds.single_request("hello-world", "b1f2c3").build()?;
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.headers()[ACCEPT], SINGLE_OBJECT);
        let pairs = query_pairs(&request);
        assert!(pairs.contains(&("user_id".to_owned(), "eq.b1f2c3".to_owned())));
        Ok(())
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-9/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn test_service_error_not_singular() {
        let body = r#"{
            "code": "PGRST116",
            "details": "The result contains 0 rows",
            "hint": null,
            "message": "JSON object requested, multiple (or no) rows returned"
        }"#;
        let err = service_error(StatusCode::NOT_ACCEPTABLE, body);
        assert!(matches!(err, Error::NotSingleRow { rows: 0, .. }));
        assert_eq!(
            err.to_string(),
            "JSON object requested, multiple (or no) rows returned"
        );
        let body = r#"{
            "code": "PGRST116",
            "details": "Results contain 2 rows, application/vnd.pgrst.object+json requires 1 row",
            "hint": null,
            "message": "JSON object requested, multiple (or no) rows returned"
        }"#;
        let err = service_error(StatusCode::NOT_ACCEPTABLE, body);
        assert!(matches!(err, Error::NotSingleRow { rows: 2, .. }));
    }

    #[test]
    fn test_service_error_message() {
        let body = r#"{
            "code": "42501",
            "details": null,
            "hint": null,
            "message": "permission denied for table likes_for_mdx_blog_2"
        }"#;
        let err = service_error(StatusCode::UNAUTHORIZED, body);
        assert_eq!(
            err.to_string(),
            "permission denied for table likes_for_mdx_blog_2"
        );
        let err = service_error(StatusCode::BAD_GATEWAY, "");
        assert!(matches!(err, Error::Service { status: 502, .. }));
        assert_eq!(err.to_string(), "502 Bad Gateway");
    }

    #[tokio::test]
    async fn test_unreachable_service() -> Result<(), Error> {
        // nothing listens on the discard port
        let lds = PostgrestLikeDataSource::new("http://127.0.0.1:9", "anon")?;
        let result = lds.count_likes("hello-world").await;
        assert!(matches!(result, Err(Error::Transport(_))));
        Ok(())
    }
}
