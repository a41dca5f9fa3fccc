use glview::camera::{ArcballCamera, Camera, FpsCamera, MoveDirection, MoveStyle, ViewCamera};
use glview::driver::{FrameDriver, InputEvent};
use glview::mesh::BoxMesh;
use glview::replay::ReplayScript;
use glview::settings::{Settings, ViewportSettings};
use nalgebra_glm as glm;

fn mutate(camera: &mut Camera) {
    camera.process_mouse_scroll(17.0);
    match camera {
        Camera::Fps(fps) => {
            fps.process_keyboard(MoveDirection::Forward, 0.7, 2.0);
            fps.process_keyboard(MoveDirection::Left, 0.3, 1.0);
            fps.process_mouse_movement(-240.0, 85.0, true);
        }
        Camera::Arcball(arcball) => {
            arcball.process_mouse_movement(1024, 768, 95.0, -40.0, MoveStyle::Arcball);
            arcball.process_mouse_movement(1024, 768, 30.0, 12.0, MoveStyle::Planar);
            arcball.set_distance(6.5);
            arcball.set_sensitivity(0.2);
        }
    }
}

#[test]
fn reset_restores_construction_pose_for_every_variant() {
    let cameras = [
        Camera::from(FpsCamera::new(
            glm::vec3(-2.0, 1.0, 5.0),
            glm::vec3(0.0, 1.0, 0.0),
            -120.0,
            15.0,
        )),
        Camera::from(ArcballCamera::new(
            glm::vec3(3.0, 4.0, 12.0),
            glm::vec3(0.0, 1.0, 0.0),
            glm::vec3(0.0, 1.0, 0.0),
        )),
    ];

    for original in cameras {
        let mut camera = original.clone();
        mutate(&mut camera);
        assert!(glm::distance(&camera.position(), &original.position()) > 1e-3);

        camera.reset();
        assert!(glm::distance(&camera.position(), &original.position()) < 1e-5);
        assert_eq!(camera.zoom(), original.zoom());
        assert!((camera.view_matrix() - original.view_matrix()).abs().max() < 1e-5);
    }
}

#[test]
fn arcball_at_ten_matches_standard_look_at() {
    let camera = ArcballCamera::new(
        glm::vec3(0.0, 0.0, 10.0),
        glm::vec3(0.0, 0.0, 0.0),
        glm::vec3(0.0, 1.0, 0.0),
    );
    let expected = glm::look_at(
        &glm::vec3(0.0, 0.0, 10.0),
        &glm::vec3(0.0, 0.0, 0.0),
        &glm::vec3(0.0, 1.0, 0.0),
    );
    assert!((camera.view_matrix() - expected).abs().max() < 1e-5);
}

#[test]
fn set_distance_places_camera_on_sphere() {
    let mut camera = ArcballCamera::default();
    camera.process_mouse_movement(1280, 720, 77.0, 31.0, MoveStyle::Arcball);
    for distance in [0.5, 5.0, 50.0] {
        camera.set_distance(distance);
        let offset = camera.position() - camera.pivot();
        assert!((glm::length(&offset) - distance).abs() < 1e-4 * distance.max(1.0));
    }
}

#[test]
fn demo_script_replays() {
    let script = ReplayScript::from_json(include_str!("../scripts/orbit_box.json")).unwrap();
    let reports = script.run(&Settings::default()).unwrap();
    assert_eq!(reports.len(), 8);

    // orbiting keeps the camera on the 10-unit sphere
    for report in &reports[..3] {
        let position = glm::make_vec3(&report.position);
        assert!((glm::length(&position) - 10.0).abs() < 1e-3);
    }

    // input while the overlay is focused is dropped
    assert_eq!(reports[4].position, reports[3].position);

    // distance and zoom requests land in the same frame
    assert_eq!(reports[5].zoom, 40.0);

    let last = reports.last().unwrap();
    assert_eq!(last.zoom, 45.0);
    assert!((last.position[2] - 10.0).abs() < 1e-5);
    assert!(last.position[0].abs() < 1e-5 && last.position[1].abs() < 1e-5);
}

#[test]
fn long_orbit_keeps_basis_orthonormal() {
    let mut camera = ArcballCamera::new(
        glm::vec3(2.0, 3.0, 9.0),
        glm::vec3(0.5, -0.5, 0.0),
        glm::vec3(0.0, 1.0, 0.0),
    );
    let radius = glm::distance(&camera.position(), &camera.pivot());
    for step in 0..500 {
        let dx = 21.0 - (step % 43) as f32;
        let dy = (step % 11) as f32 * 3.0 - 14.0;
        camera.process_mouse_movement(1024, 768, dx, dy, MoveStyle::Arcball);
    }

    let basis = camera.basis();
    for (a, b) in [
        (basis.front, basis.right),
        (basis.front, basis.up),
        (basis.right, basis.up),
    ] {
        assert!(glm::dot(&a, &b).abs() < 1e-5);
    }
    for v in [basis.front, basis.right, basis.up] {
        assert!((glm::length(&v) - 1.0).abs() < 1e-5);
    }
    let rotation = glm::mat4_to_mat3(&camera.view_matrix());
    assert!((rotation.determinant() - 1.0).abs() < 1e-4);
    assert!((glm::distance(&camera.position(), &camera.pivot()) - radius).abs() < 1e-3);
}

#[test]
fn degenerate_distance_never_reaches_the_camera() {
    let err = ReplayScript::from_json(
        r#"{ "frames": [ { "events": [ { "type": "set_distance", "distance": 0.0 } ] } ] }"#,
    )
    .unwrap_err();
    assert_eq!(err.key, "bad-distance");

    let mut driver = FrameDriver::new(ArcballCamera::default().into(), ViewportSettings::default());
    driver.handle_event(&InputEvent::SetDistance { distance: -1.0 });
    let report = driver.frame(0.0);
    assert_eq!(report.position, [0.0, 0.0, 10.0]);
    let rotation = glm::mat4_to_mat3(&glm::Mat4::from(report.view));
    assert!((rotation.determinant() - 1.0).abs() < 1e-5);
}

#[test]
fn default_box_is_inside_the_default_frustum() {
    let mut driver = FrameDriver::new(ArcballCamera::default().into(), ViewportSettings::default());
    let report = driver.frame(0.0);
    let clip_from_world = glm::Mat4::from(report.projection) * glm::Mat4::from(report.view);

    let vertices = BoxMesh::default().vertices();
    assert_eq!(BoxMesh::vertex_bytes(&vertices).len(), vertices.len() * 32);
    for vertex in &vertices {
        let [x, y, z] = vertex.position;
        let clip = clip_from_world * glm::vec4(x, y, z, 1.0);
        assert!(clip.w > 0.0);
        assert!(clip.x.abs() < clip.w && clip.y.abs() < clip.w && clip.z.abs() < clip.w);
    }
}
