use dojo_core::model::BeltRank;
use services::Screen;

use super::test_harness::{QuizSetup, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn auth_view_smoke_lists_every_belt() {
    let mut harness = setup_view_harness(Screen::Auth, QuizSetup::None).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Enter Dojo"), "missing submit in {html}");
    for belt in BeltRank::ALL {
        assert!(html.contains(belt.label()), "missing {belt} in {html}");
    }
    assert!(html.contains("Sensei Portal"), "missing admin link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_greets_student() {
    let mut harness = setup_view_harness(Screen::Dashboard, QuizSetup::None).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Osu, Tariq!"), "missing greeting in {html}");
    assert!(html.contains("Blue Belt"), "missing belt in {html}");
    assert!(html.contains("Begin Training"), "missing start in {html}");
    assert!(html.contains("Using the academy key"), "missing key source in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_first_question() {
    let mut harness = setup_view_harness(Screen::QuizSession, QuizSetup::Started).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 5"), "missing progress in {html}");
    assert!(html.contains("2:00"), "missing timer in {html}");
    assert!(html.contains("Kihon question 1"), "missing prompt in {html}");
    assert!(html.contains("জোদান"), "missing bengali option in {html}");
    assert!(html.contains("Proceed"), "missing advance in {html}");
    assert!(html.contains("Abort Session"), "missing abort in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_session_offers_return() {
    let mut harness = setup_view_harness(Screen::QuizSession, QuizSetup::None).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No quiz is running."), "missing status in {html}");
    assert!(html.contains("Return to Dashboard"), "missing return in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_review() {
    let mut harness = setup_view_harness(Screen::Results, QuizSetup::Finished).await;
    harness.rebuild();
    let html = harness.render();
    // Every answer was option 0; questions 1 and 5 expect it.
    assert!(html.contains("2/5"), "missing score in {html}");
    assert!(html.contains("40%"), "missing percentage in {html}");
    assert!(html.contains("Correct answer: Gedan"), "missing correction in {html}");
    assert!(html.contains("ব্যাখ্যা 3"), "missing bengali explanation in {html}");
    assert!(html.contains("Train Again"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn finished_quiz_is_recorded_for_admin() {
    let harness = setup_view_harness(Screen::Results, QuizSetup::Finished).await;
    let results = harness.services.recorder().list_results().await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].student_name(), "Tariq");
    assert_eq!(results[0].score(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_starts_locked() {
    let mut harness = setup_view_harness(Screen::AdminPortal, QuizSetup::None).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Sensei Portal"), "missing title in {html}");
    assert!(html.contains("Sensei code"), "missing pin field in {html}");
    assert!(!html.contains("Student results"), "results leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn logged_out_student_lands_on_login_form() {
    let harness = setup_view_harness(Screen::Dashboard, QuizSetup::None).await;
    harness.services.users().logout().await.unwrap();
    let state = harness.services.load_state().await.unwrap();
    assert_eq!(state.router.screen(), Screen::Auth);
}
