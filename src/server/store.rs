//! # Store
//!
//! SQLite storage for the portfolio records.
//!
//! [`Database`] wraps a `rusqlite` connection with the schema applied at open.
//! [`StoreActor`] owns a `Database` on a blocking thread and serves reads one at a
//! time; HTTP handlers reach it through the cloneable [`StoreClient`].

use super::StoreError;
use crate::model::{Education, Experience, Profile, Project, Technology};
use crate::resource::{ResourceKind, ResourcePayload};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const SCHEMA_SQL: &str = include_str!("schema.sql");

const PROFILE_COLUMNS: &str = "id, name, title, bio, bio_extended, avatar_url, location, \
     location_url, github_url, linkedin_url, discord_url, email, resume_url, created_at";
const PROJECT_COLUMNS: &str =
    "id, title, description, technologies, image_url, project_url, github_url, featured, created_at";
const EXPERIENCE_COLUMNS: &str = r#"id, position, company, period, description, "order", created_at"#;
const EDUCATION_COLUMNS: &str = r#"id, degree, institution, period, description, "order", created_at"#;
const TECHNOLOGY_COLUMNS: &str = r#"id, name, "order", icon, image_url, url, created_at"#;

/// Portfolio database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and applies the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|error| StoreError::CreateDir {
                path: parent.to_path_buf(),
                error,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        debug!(path = %path.display(), "Database initialized");
        Ok(Self { conn })
    }

    /// Opens a private in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Writes (local setup and tests). Ids are assigned by the database.
    // ─────────────────────────────────────────────────────────────────────────

    pub fn insert_profile(&self, profile: &Profile) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO profile (name, title, bio, bio_extended, avatar_url, location, \
             location_url, github_url, linkedin_url, discord_url, email, resume_url, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                profile.name,
                profile.title,
                profile.bio,
                profile.bio_extended,
                profile.avatar_url,
                profile.location,
                profile.location_url,
                profile.github_url,
                profile.linkedin_url,
                profile.discord_url,
                profile.email,
                profile.resume_url,
                encode_time(&profile.created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_project(&self, project: &Project) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO projects (title, description, technologies, image_url, project_url, \
             github_url, featured, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                project.title,
                project.description,
                project.technologies.join(","),
                project.image_url,
                project.project_url,
                project.github_url,
                project.featured,
                encode_time(&project.created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_experience(&self, experience: &Experience) -> Result<i64, StoreError> {
        self.conn.execute(
            r#"INSERT INTO experiences (position, company, period, description, "order", created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            params![
                experience.position,
                experience.company,
                experience.period,
                experience.description,
                experience.order,
                encode_time(&experience.created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_education(&self, education: &Education) -> Result<i64, StoreError> {
        self.conn.execute(
            r#"INSERT INTO education (degree, institution, period, description, "order", created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            params![
                education.degree,
                education.institution,
                education.period,
                education.description,
                education.order,
                encode_time(&education.created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_technology(&self, technology: &Technology) -> Result<i64, StoreError> {
        self.conn.execute(
            r#"INSERT INTO technologies (name, "order", icon, image_url, url, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            params![
                technology.name,
                technology.order,
                technology.icon,
                technology.image_url,
                technology.url,
                encode_time(&technology.created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads. Every collection is totally ordered: rank or creation time, then id.
    // ─────────────────────────────────────────────────────────────────────────

    /// The most recently created profile, if any.
    pub fn latest_profile(&self) -> Result<Option<Profile>, StoreError> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM profile ORDER BY created_at DESC, id DESC LIMIT 1"
        );
        let profile = self
            .conn
            .query_row(&sql, [], profile_from_row)
            .optional()?;
        Ok(profile)
    }

    /// Projects, newest first.
    pub fn projects(&self) -> Result<Vec<Project>, StoreError> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        self.query_all(&sql, project_from_row)
    }

    /// Experience entries by rank.
    pub fn experiences(&self) -> Result<Vec<Experience>, StoreError> {
        let sql = format!(r#"SELECT {EXPERIENCE_COLUMNS} FROM experiences ORDER BY "order" ASC, id ASC"#);
        self.query_all(&sql, experience_from_row)
    }

    /// Education entries by rank.
    pub fn education(&self) -> Result<Vec<Education>, StoreError> {
        let sql = format!(r#"SELECT {EDUCATION_COLUMNS} FROM education ORDER BY "order" ASC, id ASC"#);
        self.query_all(&sql, education_from_row)
    }

    /// Technologies by rank.
    pub fn technologies(&self) -> Result<Vec<Technology>, StoreError> {
        let sql = format!(r#"SELECT {TECHNOLOGY_COLUMNS} FROM technologies ORDER BY "order" ASC, id ASC"#);
        self.query_all(&sql, technology_from_row)
    }

    /// Reads one kind. `Ok(None)` only when the profile has no row.
    pub fn fetch(&self, kind: ResourceKind) -> Result<Option<ResourcePayload>, StoreError> {
        let payload = match kind {
            ResourceKind::Profile => return Ok(self.latest_profile()?.map(ResourcePayload::Profile)),
            ResourceKind::Projects => ResourcePayload::Projects(self.projects()?),
            ResourceKind::Experiences => ResourcePayload::Experiences(self.experiences()?),
            ResourceKind::Education => ResourcePayload::Education(self.education()?),
            ResourceKind::Technologies => ResourcePayload::Technologies(self.technologies()?),
        };
        Ok(Some(payload))
    }

    fn query_all<T>(
        &self,
        sql: &str,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], map)?.collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn encode_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn time_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        name: row.get(1)?,
        title: row.get(2)?,
        bio: row.get(3)?,
        bio_extended: row.get(4)?,
        avatar_url: row.get(5)?,
        location: row.get(6)?,
        location_url: row.get(7)?,
        github_url: row.get(8)?,
        linkedin_url: row.get(9)?,
        discord_url: row.get(10)?,
        email: row.get(11)?,
        resume_url: row.get(12)?,
        created_at: time_at(row, 13)?,
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let technologies: String = row.get(3)?;
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        technologies: split_list(&technologies),
        image_url: row.get(4)?,
        project_url: row.get(5)?,
        github_url: row.get(6)?,
        featured: row.get(7)?,
        created_at: time_at(row, 8)?,
    })
}

fn experience_from_row(row: &Row<'_>) -> rusqlite::Result<Experience> {
    Ok(Experience {
        id: row.get(0)?,
        position: row.get(1)?,
        company: row.get(2)?,
        period: row.get(3)?,
        description: row.get(4)?,
        order: row.get(5)?,
        created_at: time_at(row, 6)?,
    })
}

fn education_from_row(row: &Row<'_>) -> rusqlite::Result<Education> {
    Ok(Education {
        id: row.get(0)?,
        degree: row.get(1)?,
        institution: row.get(2)?,
        period: row.get(3)?,
        description: row.get(4)?,
        order: row.get(5)?,
        created_at: time_at(row, 6)?,
    })
}

fn technology_from_row(row: &Row<'_>) -> rusqlite::Result<Technology> {
    Ok(Technology {
        id: row.get(0)?,
        name: row.get(1)?,
        order: row.get(2)?,
        icon: row.get(3)?,
        image_url: row.get(4)?,
        url: row.get(5)?,
        created_at: time_at(row, 6)?,
    })
}

type FetchResponse = oneshot::Sender<Result<Option<ResourcePayload>, StoreError>>;

#[derive(Debug)]
enum StoreRequest {
    Fetch {
        kind: ResourceKind,
        respond_to: FetchResponse,
    },
}

/// Owns the [`Database`] and answers reads sequentially.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
}

impl StoreActor {
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver }, StoreClient { sender })
    }

    /// Runs on a blocking thread until every [`StoreClient`] is dropped.
    pub fn spawn(self, db: Database) -> JoinHandle<()> {
        tokio::task::spawn_blocking(move || self.run(db))
    }

    fn run(mut self, db: Database) {
        info!("Store started");
        while let Some(msg) = self.receiver.blocking_recv() {
            match msg {
                StoreRequest::Fetch { kind, respond_to } => {
                    let result = db.fetch(kind);
                    match &result {
                        Ok(Some(payload)) => debug!(%kind, records = payload.len(), "Fetch"),
                        Ok(None) => debug!(%kind, "Fetch found nothing"),
                        Err(e) => warn!(%kind, error = %e, "Fetch failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }
        info!("Store shutdown");
    }
}

/// Cheap-to-clone handle to the [`StoreActor`].
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub async fn fetch(&self, kind: ResourceKind) -> Result<Option<ResourcePayload>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Fetch { kind, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
