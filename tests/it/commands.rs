use crate::helper::fake_docker;
use dockhand::{DockerCli, DockhandError, ImageBuild, RemoveStatus};
use test_log::test;

#[test(tokio::test)]
async fn remove_container_downgrades_absent_target() {
    let dir = tempfile::tempdir().unwrap();
    let docker = fake_docker(
        &dir,
        "echo 'Error: No such container: missing' >&2\nexit 1",
    );

    let status = DockerCli::with_binary(docker)
        .remove_container("missing")
        .await
        .expect("exit code 1 should be a successful no-op");
    assert_eq!(status, RemoveStatus::AlreadyAbsent);
}

#[test(tokio::test)]
async fn remove_container_propagates_other_failures() {
    let dir = tempfile::tempdir().unwrap();
    let docker = fake_docker(&dir, "echo 'cannot connect to daemon' >&2\nexit 2");

    let err = DockerCli::with_binary(docker)
        .remove_container("db")
        .await
        .unwrap_err();
    match err {
        DockhandError::CommandFailed {
            exit_code, stderr, ..
        } => {
            assert_eq!(exit_code, 2);
            assert_eq!(stderr, "cannot connect to daemon");
        }
        e => panic!("unexpected error: {}", e),
    }
}

#[test(tokio::test)]
async fn remove_containers_reports_status_per_target() {
    let dir = tempfile::tempdir().unwrap();
    let docker = fake_docker(&dir, "exit 1");

    let statuses = DockerCli::with_binary(docker)
        .remove_containers(&["one", "two"])
        .await
        .unwrap();
    assert_eq!(
        statuses,
        vec![RemoveStatus::AlreadyAbsent, RemoveStatus::AlreadyAbsent]
    );
}

#[test(tokio::test)]
async fn remove_image_reports_removed_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let docker = fake_docker(&dir, "exit 0");

    let status = DockerCli::with_binary(docker)
        .remove_image("app:test")
        .await
        .unwrap();
    assert_eq!(status, RemoveStatus::Removed);
}

#[test(tokio::test)]
async fn image_exists_tests_listing_output() {
    let dir = tempfile::tempdir().unwrap();
    let docker = fake_docker(&dir, "printf 'app:latest\\npostgres:16\\n'");
    let docker = DockerCli::with_binary(docker);

    assert!(docker.image_exists("postgres:16").await.unwrap());
    assert!(!docker.image_exists("redis:7").await.unwrap());
}

#[test(tokio::test)]
async fn create_network_returns_trimmed_id() {
    let dir = tempfile::tempdir().unwrap();
    let docker = fake_docker(&dir, "echo '9f6bc3c159de'");

    let id = DockerCli::with_binary(docker)
        .create_network("test-net")
        .await
        .unwrap();
    assert_eq!(id, "9f6bc3c159de");
}

#[test(tokio::test)]
async fn remove_network_downgrades_absent_target() {
    let dir = tempfile::tempdir().unwrap();
    let docker = fake_docker(&dir, "echo 'Error: No such network: test-net' >&2\nexit 1");

    let status = DockerCli::with_binary(docker)
        .remove_network("test-net")
        .await
        .unwrap();
    assert_eq!(status, RemoveStatus::AlreadyAbsent);
}

#[test(tokio::test)]
async fn build_without_dockerfile_rejects_before_spawning() {
    let dir = tempfile::tempdir().unwrap();
    // The fake records every invocation; a rejected build must leave no record.
    let docker = fake_docker(&dir, "touch \"$(dirname \"$0\")/invoked\"");
    let marker = dir.path().join("invoked");

    let err = DockerCli::with_binary(docker)
        .build_image(ImageBuild::with_context(dir.path()).tag("app:test"))
        .await
        .unwrap_err();

    assert_eq!(err, DockhandError::MissingArgument("dockerfile"));
    assert!(!marker.exists(), "no process may be spawned");
}

#[test(tokio::test)]
async fn build_with_dockerfile_invokes_the_binary() {
    let dir = tempfile::tempdir().unwrap();
    let docker = fake_docker(&dir, "touch \"$(dirname \"$0\")/invoked\"");
    let marker = dir.path().join("invoked");

    DockerCli::with_binary(docker)
        .build_image(
            ImageBuild::with_context(dir.path())
                .dockerfile("Dockerfile")
                .tag("app:test"),
        )
        .await
        .unwrap();

    assert!(marker.exists());
}

#[test(tokio::test)]
async fn unspawnable_binary_surfaces_invocation_error() {
    let docker = DockerCli::with_binary("/nonexistent/docker-binary");

    let err = docker.remove_image("app:test").await.unwrap_err();
    match err {
        DockhandError::Invocation(_) => {}
        e => panic!("unexpected error: {}", e),
    }
}

#[test(tokio::test)]
async fn empty_arguments_are_rejected_without_spawning() {
    // The binary does not exist; reaching a spawn would fail differently.
    let docker = DockerCli::with_binary("/nonexistent/docker-binary");

    assert_eq!(
        docker.remove_container("").await.unwrap_err(),
        DockhandError::MissingArgument("container")
    );
    assert_eq!(
        docker.create_network("").await.unwrap_err(),
        DockhandError::MissingArgument("network")
    );
    assert_eq!(
        docker.remove_image("").await.unwrap_err(),
        DockhandError::MissingArgument("image")
    );
}
