use std::sync::{Arc, Mutex};

use gitea_line_core::{
    BrowserLauncher, ConfirmPrompt, ConfirmRequest, Confirmation, Error, HostError, HostResult,
    LauncherRegistry, OpenOutcome, OpenService, Permalink,
};

#[derive(Default, Clone)]
struct RecordingLauncher {
    opened: Arc<Mutex<Vec<String>>>,
}

impl BrowserLauncher for RecordingLauncher {
    fn id(&self) -> &'static str {
        "recording"
    }

    fn label(&self) -> &'static str {
        "Recording Launcher"
    }

    fn browse(&self, url: &str) -> HostResult<()> {
        self.opened.lock().expect("opened lock").push(url.to_owned());
        Ok(())
    }
}

struct BrokenLauncher;

impl BrowserLauncher for BrokenLauncher {
    fn id(&self) -> &'static str {
        "broken"
    }

    fn label(&self) -> &'static str {
        "Broken Launcher"
    }

    fn browse(&self, _url: &str) -> HostResult<()> {
        Err(HostError::message("no display"))
    }
}

struct ScriptedPrompt {
    answer: Confirmation,
    asked: Mutex<Vec<ConfirmRequest>>,
}

impl ScriptedPrompt {
    fn new(answer: Confirmation) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&self, request: &ConfirmRequest) -> HostResult<Confirmation> {
        self.asked.lock().expect("asked lock").push(request.clone());
        Ok(self.answer)
    }
}

fn permalink() -> Permalink {
    Permalink {
        url: "https://gitea.example.com/org/proj/src/branch/main/src/app.go#L42".into(),
        branch: "main".into(),
        relative_path: "src/app.go".into(),
        line: 42,
    }
}

fn service_with(launcher: &RecordingLauncher) -> OpenService {
    let mut registry = LauncherRegistry::new();
    registry.register(launcher.clone());
    registry.register(BrokenLauncher);
    OpenService::new(registry)
}

#[test]
fn confirmed_permalink_is_opened_once() {
    let launcher = RecordingLauncher::default();
    let service = service_with(&launcher);
    let prompt = ScriptedPrompt::new(Confirmation::Yes);

    let outcome = service
        .confirm_and_open("recording", &prompt, &permalink())
        .expect("open");

    assert_eq!(outcome, OpenOutcome::Opened);
    assert_eq!(*launcher.opened.lock().expect("opened"), vec![permalink().url]);

    let asked = prompt.asked.lock().expect("asked");
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].title, "Open URL in Your Browser?");
    assert_eq!(
        asked[0].message,
        format!("Do you want to open \"{}\"", permalink().url)
    );
}

#[test]
fn declined_permalink_is_never_launched() {
    let launcher = RecordingLauncher::default();
    let service = service_with(&launcher);

    let outcome = service
        .confirm_and_open("recording", &ScriptedPrompt::new(Confirmation::No), &permalink())
        .expect("declined");

    assert_eq!(outcome, OpenOutcome::Declined);
    assert!(launcher.opened.lock().expect("opened").is_empty());
}

#[test]
fn unknown_launcher_is_reported_before_prompting() {
    let service = service_with(&RecordingLauncher::default());
    let prompt = ScriptedPrompt::new(Confirmation::Yes);

    let err = service
        .confirm_and_open("missing", &prompt, &permalink())
        .expect_err("missing launcher");

    match err {
        Error::LauncherNotRegistered { launcher } => assert_eq!(launcher, "missing"),
        other => panic!("expected LauncherNotRegistered, got {other:?}"),
    }
    assert!(prompt.asked.lock().expect("asked").is_empty());
}

#[test]
fn launcher_failure_names_the_launcher() {
    let service = service_with(&RecordingLauncher::default());

    let err = service
        .confirm_and_open("broken", &ScriptedPrompt::new(Confirmation::Yes), &permalink())
        .expect_err("launcher fails");

    assert_eq!(err.to_string(), "launcher 'broken' failed: no display");
}

#[test]
fn summaries_list_registered_launchers() {
    let service = service_with(&RecordingLauncher::default());
    let ids: Vec<String> = service.summaries().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["broken".to_string(), "recording".to_string()]);
}
