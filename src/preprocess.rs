//! Context enrichment pipeline.
//!
//! Each preprocessor is a single context-to-context transformation run
//! once per build. The pipeline order is fixed: navbar shaping, blog
//! aggregation, maintainer lookup, release lookup. Rate-limit responses
//! truncate the affected step with a warning; any other lookup failure
//! aborts the run.

use crate::config::{Config, Context};
use crate::error::{Error, Result};
use crate::fetch::HttpClient;
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single transformation over the context mapping.
pub trait Preprocessor {
    /// Step name used in diagnostics and contract-violation errors.
    fn name(&self) -> &'static str;

    /// Transforms the context, extending it in place with derived data.
    fn process(&self, config: &Config, context: Context) -> Result<Context>;
}

/// Builds the fixed preprocessor pipeline in execution order.
pub fn default_preprocessors(client: &HttpClient) -> Vec<Box<dyn Preprocessor>> {
    vec![
        Box::new(Navbar),
        Box::new(BlogPosts { client: client.clone() }),
        Box::new(Maintainers { client: client.clone() }),
        Box::new(Releases { client: client.clone() }),
    ]
}

/// Derives `has_subitems` and `slug` for every navbar item, preserving
/// item order and any extra keys the document carries.
pub struct Navbar;

impl Preprocessor for Navbar {
    fn name(&self) -> &'static str {
        "navbar"
    }

    fn process(&self, _config: &Config, mut context: Context) -> Result<Context> {
        let items = match context.get_mut("navbar") {
            Some(Value::Array(items)) => items,
            _ => return Err(Error::Config("'navbar' must be a list".to_string())),
        };

        for item in items {
            let entry = item
                .as_object_mut()
                .ok_or_else(|| Error::Config("navbar items must be mappings".to_string()))?;
            let slug = entry
                .get("name")
                .and_then(Value::as_str)
                .map(|name| name.replace(' ', "-").to_lowercase())
                .ok_or_else(|| Error::Config("navbar items must have a 'name'".to_string()))?;
            let has_subitems = entry.get("target").is_some_and(Value::is_array);

            entry.insert("has_subitems".to_string(), Value::Bool(has_subitems));
            entry.insert("slug".to_string(), Value::String(slug));
        }

        Ok(context)
    }
}

/// A single aggregated blog entry derived from a feed document.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub title: String,
    pub author: String,
    pub published: DateTime<Utc>,
    pub feed: String,
    pub link: String,
    pub description: String,
    pub summary: String,
}

/// Aggregates entries from every configured feed into `blog.posts`,
/// sorted by publication time descending and truncated to `num_posts`.
///
/// A feed that fails to fetch or parse is skipped with a warning; the
/// remaining feeds still aggregate.
pub struct BlogPosts {
    pub client: HttpClient,
}

impl Preprocessor for BlogPosts {
    fn name(&self) -> &'static str {
        "blog_posts"
    }

    fn process(&self, config: &Config, mut context: Context) -> Result<Context> {
        let mut posts = Vec::new();
        for feed_url in &config.blog.feed {
            match self.fetch_feed(feed_url) {
                Ok(feed_posts) => posts.extend(feed_posts),
                Err(err) => warn!("Skipping feed '{}': {}", feed_url, err),
            }
        }
        posts.sort_by(|a, b| b.published.cmp(&a.published));
        posts.truncate(config.blog.num_posts);

        let blog = match context.get_mut("blog") {
            Some(Value::Object(blog)) => blog,
            _ => return Err(Error::Config("'blog' must be a mapping".to_string())),
        };
        blog.insert("posts".to_string(), serde_json::to_value(&posts)?);

        Ok(context)
    }
}

impl BlogPosts {
    fn fetch_feed(&self, url: &str) -> Result<Vec<Post>> {
        let body = self.client.get_text(url)?;
        let channel = rss::Channel::read_from(body.as_bytes())?;

        let mut posts = Vec::new();
        for item in channel.items() {
            let published = match item.pub_date().and_then(parse_feed_date) {
                Some(published) => published,
                None => {
                    warn!("Skipping undated entry in feed '{}'", url);
                    continue;
                }
            };
            let description = item.description().unwrap_or_default().to_string();
            posts.push(Post {
                title: item.title().unwrap_or_default().to_string(),
                author: item_author(item),
                published,
                feed: channel.title().to_string(),
                link: item.link().unwrap_or_default().to_string(),
                summary: description.clone(),
                description,
            });
        }
        Ok(posts)
    }
}

fn parse_feed_date(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(date).ok().map(|d| d.with_timezone(&Utc))
}

// RSS 2.0 carries the author either in <author> or in dc:creator.
fn item_author(item: &rss::Item) -> String {
    item.author()
        .map(str::to_string)
        .or_else(|| {
            item.dublin_core_ext().and_then(|dc| dc.creators().first().cloned())
        })
        .unwrap_or_default()
}

/// Fetches the profile of every active maintainer into
/// `maintainers.people`, preserving the configured order.
///
/// Profiles are stored as the service returns them; their schema belongs
/// to the external API and templates may use any field. A rate-limit
/// response stops the loop and keeps the profiles accumulated so far.
pub struct Maintainers {
    pub client: HttpClient,
}

impl Preprocessor for Maintainers {
    fn name(&self) -> &'static str {
        "maintainers"
    }

    fn process(&self, config: &Config, mut context: Context) -> Result<Context> {
        let mut people = Vec::new();
        for user in &config.maintainers.active {
            let url = format!("{}/users/{}", config.github.api_url, user);
            match self.client.get_json::<Value>(&url) {
                Ok(profile) => people.push(profile),
                Err(Error::RateLimited { url }) => {
                    warn!(
                        "Rate limited fetching '{}'; keeping {} of {} profiles",
                        url,
                        people.len(),
                        config.maintainers.active.len()
                    );
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        let maintainers = match context.get_mut("maintainers") {
            Some(Value::Object(maintainers)) => maintainers,
            _ => return Err(Error::Config("'maintainers' must be a mapping".to_string())),
        };
        maintainers.insert("people".to_string(), Value::Array(people));

        Ok(context)
    }
}

/// A published release derived from the repository release listing.
#[derive(Debug, Clone, Serialize)]
pub struct Release {
    pub name: String,
    pub tag: String,
    pub published: DateTime<Utc>,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct ApiRelease {
    tag_name: String,
    prerelease: bool,
    published_at: DateTime<Utc>,
    #[serde(default)]
    assets: Vec<ApiAsset>,
}

#[derive(Debug, Deserialize)]
struct ApiAsset {
    browser_download_url: String,
}

/// Fetches the repository release listing into `releases`, excluding
/// pre-releases. A rate-limit response leaves the list empty.
pub struct Releases {
    pub client: HttpClient,
}

impl Preprocessor for Releases {
    fn name(&self) -> &'static str {
        "releases"
    }

    fn process(&self, config: &Config, mut context: Context) -> Result<Context> {
        let url =
            format!("{}/repos/{}/releases", config.github.api_url, config.github.repo);
        let releases = match self.client.get_json::<Vec<ApiRelease>>(&url) {
            Ok(entries) => convert_releases(entries),
            Err(Error::RateLimited { url }) => {
                warn!("Rate limited fetching '{}'; release list left empty", url);
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        context.insert("releases".to_string(), serde_json::to_value(&releases)?);

        Ok(context)
    }
}

fn convert_releases(entries: Vec<ApiRelease>) -> Vec<Release> {
    entries
        .into_iter()
        .filter(|entry| !entry.prerelease)
        .map(|entry| {
            let name =
                entry.tag_name.strip_prefix('v').unwrap_or(&entry.tag_name).to_string();
            let url = entry
                .assets
                .first()
                .map(|asset| asset.browser_download_url.clone())
                .unwrap_or_default();
            Release { name, tag: entry.tag_name, published: entry.published_at, url }
        })
        .collect()
}
