//! Behaviour every `CourseRepository` has to show, whatever store backs it.
use courses_core::model::{CourseUpdate, NewCourse};
use courses_core::{CourseId, CourseRepository};

pub fn new_course(name: &str) -> NewCourse {
    NewCourse::new(name.to_string(), Some(format!("{name} description")))
}

pub async fn get_unknown_id_returns_none<R: CourseRepository>(repo: R) {
    let result = repo.get(&CourseId::generate().to_string()).await.unwrap();

    assert!(result.is_none());
}

pub async fn get_malformed_id_returns_none<R: CourseRepository>(repo: R) {
    repo.create(new_course("Algebra")).await.unwrap();

    for id in ["", "bad-id", "123", "add"] {
        let result = repo.get(id).await.unwrap();
        assert!(result.is_none(), "id '{id}'");
    }
}

pub async fn create_then_get_returns_created_course<R: CourseRepository>(repo: R) {
    let created = repo
        .create(NewCourse::new("Algebra".into(), Some("intro".into())))
        .await
        .unwrap();

    let found = repo
        .get(&created.id.to_string())
        .await
        .unwrap()
        .expect("recently created course exists");

    assert_eq!(&created, &found);
    assert_eq!("Algebra", found.name);
    assert_eq!(Some("intro"), found.description.as_deref());
}

pub async fn no_courses_created_list_returns_empty_vec<R: CourseRepository>(repo: R) {
    let courses = repo.list().await.unwrap();

    assert!(courses.is_empty());
}

pub async fn list_returns_every_created_course<R: CourseRepository>(repo: R) {
    let mut created = Vec::with_capacity(5);
    for i in 0..5 {
        created.push(repo.create(new_course(&format!("course {i}"))).await.unwrap());
    }

    let listed = repo.list().await.unwrap();

    assert_eq!(created.len(), listed.len());
    for expected in &created {
        assert!(listed.contains(expected), "{expected:?} is listed");
    }
}

pub async fn update_replaces_name_and_description<R: CourseRepository>(repo: R) {
    let created = repo.create(new_course("Algebra")).await.unwrap();

    let updated = repo
        .update(
            &created.id.to_string(),
            CourseUpdate::new("Algebra II".into(), Some("second part".into())),
        )
        .await
        .unwrap()
        .expect("existing course is updated");

    assert_eq!(created.id, updated.id);
    assert_eq!(created.created_at, updated.created_at);
    assert_eq!("Algebra II", updated.name);
    assert_eq!(Some("second part"), updated.description.as_deref());

    let found = repo.get(&created.id.to_string()).await.unwrap();
    assert_eq!(Some(updated), found);
}

pub async fn update_without_description_keeps_description<R: CourseRepository>(repo: R) {
    let created = repo.create(new_course("Algebra")).await.unwrap();

    let updated = repo
        .update(
            &created.id.to_string(),
            CourseUpdate::new("Algebra II".into(), None),
        )
        .await
        .unwrap()
        .expect("existing course is updated");

    assert_eq!("Algebra II", updated.name);
    assert_eq!(created.description, updated.description);
}

pub async fn update_unknown_id_returns_none<R: CourseRepository>(repo: R) {
    let result = repo
        .update(
            &CourseId::generate().to_string(),
            CourseUpdate::new("Algebra".into(), None),
        )
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(repo.list().await.unwrap().is_empty());
}

pub async fn delete_returns_deleted_course_once<R: CourseRepository>(repo: R) {
    let created = repo.create(new_course("Algebra")).await.unwrap();
    let id = created.id.to_string();

    let deleted = repo.delete(&id).await.unwrap();
    assert_eq!(Some(created), deleted);

    assert!(repo.get(&id).await.unwrap().is_none());
    assert!(repo.delete(&id).await.unwrap().is_none());
}

pub async fn delete_malformed_id_returns_none<R: CourseRepository>(repo: R) {
    repo.create(new_course("Algebra")).await.unwrap();

    assert!(repo.delete("not-an-id").await.unwrap().is_none());
    assert_eq!(1, repo.list().await.unwrap().len());
}
