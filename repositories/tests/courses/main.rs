use courses_core::CourseRepository;
use repositories::memory::courses::InMemoryCourseRepo;
use rstest::{fixture, rstest};

mod contract;

/// Runs a contract against a fresh in-memory store.
macro_rules! memory_test {
    ($name:ident => $contract:path) => {
        #[rstest]
        #[tokio::test]
        async fn $name(memory_repo: InMemoryCourseRepo) {
            $contract(memory_repo).await
        }
    };
}

/// Runs a contract against a fresh mongo container. Needs a docker daemon.
macro_rules! mongo_test {
    ($name:ident => $contract:path) => {
        #[tokio::test]
        #[ignore = "starts a mongo container, needs a docker daemon"]
        async fn $name() {
            let runtime = runtime().await;
            $contract(runtime.repo.clone()).await
        }
    };
}

#[fixture]
fn memory_repo() -> InMemoryCourseRepo {
    InMemoryCourseRepo::new()
}

mod memory {
    use super::*;

    memory_test!(get_unknown_id_returns_none => contract::get_unknown_id_returns_none);
    memory_test!(get_malformed_id_returns_none => contract::get_malformed_id_returns_none);
    memory_test!(create_then_get_returns_created_course => contract::create_then_get_returns_created_course);
    memory_test!(no_courses_created_list_returns_empty_vec => contract::no_courses_created_list_returns_empty_vec);
    memory_test!(list_returns_every_created_course => contract::list_returns_every_created_course);
    memory_test!(update_replaces_name_and_description => contract::update_replaces_name_and_description);
    memory_test!(update_without_description_keeps_description => contract::update_without_description_keeps_description);
    memory_test!(update_unknown_id_returns_none => contract::update_unknown_id_returns_none);
    memory_test!(delete_returns_deleted_course_once => contract::delete_returns_deleted_course_once);
    memory_test!(delete_malformed_id_returns_none => contract::delete_malformed_id_returns_none);

    #[rstest]
    #[tokio::test]
    async fn list_is_in_creation_order(memory_repo: InMemoryCourseRepo) {
        let mut created = Vec::new();
        for name in ["Algebra", "Biology", "Chemistry"] {
            created.push(memory_repo.create(contract::new_course(name)).await.unwrap());
        }

        let listed = memory_repo.list().await.unwrap();

        assert_eq!(created, listed);
    }

    #[rstest]
    #[tokio::test]
    async fn clones_share_the_same_store(memory_repo: InMemoryCourseRepo) {
        let other = memory_repo.clone();

        let created = memory_repo
            .create(contract::new_course("Algebra"))
            .await
            .unwrap();

        let found = other.get(&created.id.to_string()).await.unwrap();
        assert_eq!(Some(created), found);
    }
}

mod mongo {
    use super::*;
    use repositories::ConnectionDetails;
    use repositories::mongo::courses::CourseRepo;
    use testcontainers_modules::mongo::Mongo;
    use testcontainers_modules::testcontainers::ContainerAsync;
    use testcontainers_modules::testcontainers::runners::AsyncRunner;

    struct TestRuntime<R: CourseRepository> {
        _container: ContainerAsync<Mongo>,
        repo: R,
    }

    async fn runtime() -> TestRuntime<CourseRepo> {
        let container = Mongo::default().start().await.unwrap();
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(27017).await.unwrap();

        let repo = CourseRepo::init(
            ConnectionDetails::Url(format!("mongodb://{host}:{port}/")),
            Some("courses_test".into()),
        )
        .await
        .unwrap();

        TestRuntime {
            _container: container,
            repo,
        }
    }

    mongo_test!(get_unknown_id_returns_none => contract::get_unknown_id_returns_none);
    mongo_test!(get_malformed_id_returns_none => contract::get_malformed_id_returns_none);
    mongo_test!(create_then_get_returns_created_course => contract::create_then_get_returns_created_course);
    mongo_test!(no_courses_created_list_returns_empty_vec => contract::no_courses_created_list_returns_empty_vec);
    mongo_test!(list_returns_every_created_course => contract::list_returns_every_created_course);
    mongo_test!(update_replaces_name_and_description => contract::update_replaces_name_and_description);
    mongo_test!(update_without_description_keeps_description => contract::update_without_description_keeps_description);
    mongo_test!(update_unknown_id_returns_none => contract::update_unknown_id_returns_none);
    mongo_test!(delete_returns_deleted_course_once => contract::delete_returns_deleted_course_once);
    mongo_test!(delete_malformed_id_returns_none => contract::delete_malformed_id_returns_none);

    #[tokio::test]
    #[ignore = "starts a mongo container, needs a docker daemon"]
    async fn ping_succeeds_against_running_instance() {
        let runtime = runtime().await;

        runtime.repo.ping().await.unwrap();
        assert_eq!("courses_test", runtime.repo.database_name());
    }
}
