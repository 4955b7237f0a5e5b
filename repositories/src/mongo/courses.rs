use crate::{ConnectionDetails, RepoInitErr, RepoInitResult};
use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use bson::{Document, doc};
use chrono::{DateTime, Utc};
use courses_core::model::{Course, CourseUpdate, NewCourse};
use courses_core::result::{CourseRepoError, OptRepoResult, RepoResult};
use courses_core::{CourseId, CourseRepository};
use error_stack::{Report, ResultExt};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;
use tracing::{debug, instrument};

const DEFAULT_DB_NAME: &str = "courses";
const COURSES_COLLECTION_NAME: &str = "courses";

#[derive(Debug, thiserror::Error)]
#[error("failed to reach the mongodb instance")]
pub struct ConnectError;

#[derive(Debug, Serialize)]
struct NewCourseDocument {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MongoCourse {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl From<MongoCourse> for Course {
    fn from(value: MongoCourse) -> Self {
        Course::new(
            CourseId::new(value.id),
            value.name,
            value.description,
            value.created_at,
        )
    }
}

/// Courses stored in the `courses` collection of a MongoDB database.
#[derive(Debug, Clone)]
pub struct CourseRepo {
    db: Database,
}

impl CourseRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Uses the database named in the connection string, falling back to `courses`.
    pub fn from_client(client: Client) -> Self {
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DB_NAME));
        Self { db }
    }

    pub async fn init(
        connection_details: ConnectionDetails,
        db_name: Option<String>,
    ) -> RepoInitResult<CourseRepo> {
        let client = match connection_details {
            ConnectionDetails::Url(url) => Client::with_uri_str(url)
                .await
                .change_context(RepoInitErr)?,
        };

        Ok(match db_name {
            Some(name) => Self::new(client.database(&name)),
            None => Self::from_client(client),
        })
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    pub async fn ping(&self) -> Result<(), Report<ConnectError>> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .change_context(ConnectError)
            .attach_with(|| format!("database '{}'", self.db.name()))?;
        Ok(())
    }

    fn collection<T: Send + Sync>(&self) -> Collection<T> {
        self.db.collection::<T>(COURSES_COLLECTION_NAME)
    }
}

fn object_id(id: &str) -> Option<ObjectId> {
    match id.parse::<CourseId>() {
        Ok(id) => Some(id.object_id()),
        Err(e) => {
            debug!("treating as not found: {e}");
            None
        }
    }
}

impl CourseRepository for CourseRepo {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Course>> {
        self.collection::<MongoCourse>()
            .find(Document::new())
            .await
            .change_context(CourseRepoError::List)?
            .map(|c| c.map(From::from))
            .collect::<Result<_, _>>()
            .await
            .change_context(CourseRepoError::List)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> OptRepoResult<Course> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        self.collection::<MongoCourse>()
            .find_one(doc! { "_id": oid })
            .await
            .change_context(CourseRepoError::Get)
            .attach_with(|| format!("course id {id}"))
            .map(|c| c.map(From::from))
    }

    #[instrument(skip_all)]
    async fn create(&self, new_course: NewCourse) -> RepoResult<Course> {
        // BSON dates only keep milliseconds, so truncate before handing the course back
        let created_at = bson::DateTime::from_chrono(new_course.created_at).to_chrono();
        let document = NewCourseDocument {
            name: new_course.name,
            description: new_course.description,
            created_at,
        };

        let result = self
            .collection::<NewCourseDocument>()
            .insert_one(&document)
            .await
            .change_context(CourseRepoError::Create)?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(CourseRepoError::Create)
            .attach_with(|| format!("inserted id {:?} was not an ObjectId", result.inserted_id))?;

        debug!("created course {id}");

        Ok(Course::new(
            CourseId::new(id),
            document.name,
            document.description,
            document.created_at,
        ))
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: &str, update: CourseUpdate) -> OptRepoResult<Course> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        let mut update_document = doc! { "name": update.name };
        if let Some(description) = update.description {
            update_document.insert("description", description);
        }

        debug!("updating course with {:?}", update_document);

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<MongoCourse>()
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": update_document })
            .with_options(options)
            .await
            .change_context(CourseRepoError::Update)
            .attach_with(|| format!("course id {id}"))
            .map(|c| c.map(From::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> OptRepoResult<Course> {
        let Some(oid) = object_id(id) else {
            return Ok(None);
        };

        self.collection::<MongoCourse>()
            .find_one_and_delete(doc! { "_id": oid })
            .await
            .change_context(CourseRepoError::Delete)
            .attach_with(|| format!("course id {id}"))
            .map(|c| c.map(From::from))
    }
}
