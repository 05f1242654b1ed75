use crate::config::ProviderConfig;
use crate::diagnostics::{FailureClass, WarningLatch};
use crate::platform::x11::{BindError, Xlib, XlibApi, XlibLoader};
use crate::platform::{CursorSourceImpl, Position};
use log::{debug, trace};
use std::ffi::CString;

/// Polls the pointer through a lazily opened X11 display connection.
///
/// Nothing is loaded or opened until the first `poll`. A missing libX11, or any failure other
/// than "no display server", makes the source permanently unavailable: it stops calling into
/// Xlib for the rest of its life. A display that cannot be opened is retried on every poll.
///
/// Xlib's default I/O error handler still calls `exit()` if the X server connection drops while
/// it is open. That handler cannot be made to return, so losing the server mid-session
/// terminates the process.
pub struct X11CursorSource<A: XlibApi = Xlib> {
    loader: XlibLoader<A>,
    display_name: Option<CString>,
    api: Option<A>,
    connection: Option<A::Connection>,
    unavailable: bool,
    warnings: WarningLatch,
}

impl X11CursorSource {
    pub fn from_config(config: &ProviderConfig) -> Self {
        match config.x11_display.as_deref().map(CString::new).transpose() {
            Ok(display_name) => Self::with_loader(display_name, Box::new(Xlib::load)),
            Err(err) => {
                let mut source = Self::with_loader(None, Box::new(Xlib::load));
                source.give_up(
                    FailureClass::Unexpected,
                    &format!("invalid X11 display name: {err}"),
                );
                source
            }
        }
    }
}

impl<A: XlibApi> X11CursorSource<A> {
    pub fn with_loader(display_name: Option<CString>, loader: XlibLoader<A>) -> Self {
        Self {
            loader,
            display_name,
            api: None,
            connection: None,
            unavailable: false,
            warnings: WarningLatch::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn warnings(&self) -> &WarningLatch {
        &self.warnings
    }

    fn give_up(&mut self, class: FailureClass, detail: &str) {
        self.unavailable = true;
        self.warnings.warn_once(
            class,
            format_args!("Global cursor position unavailable: {detail}"),
        );
    }

    fn connect(&mut self) -> Option<A::Connection> {
        if self.api.is_none() {
            match (self.loader)() {
                Ok(api) => self.api = Some(api),
                Err(err @ BindError::LibraryMissing(_)) => {
                    self.give_up(FailureClass::DependencyMissing, &err.to_string());
                    return None;
                }
                Err(err @ BindError::Unexpected(_)) => {
                    self.give_up(FailureClass::Unexpected, &err.to_string());
                    return None;
                }
            }
        }

        let api = self.api.as_ref()?;
        match api.open_connection(self.display_name.as_deref()) {
            Ok(Some(connection)) => {
                debug!("Opened X11 display connection");
                Some(connection)
            }
            Ok(None) => {
                let label = self.display_label();
                self.warnings.warn_once(
                    FailureClass::DisplayUnavailable,
                    format_args!(
                        "Could not open X11 display {label}, global cursor position unavailable"
                    ),
                );
                None
            }
            Err(err) => {
                self.give_up(
                    FailureClass::Unexpected,
                    &format!("error while opening X11 display: {err}"),
                );
                None
            }
        }
    }

    fn display_label(&self) -> String {
        match &self.display_name {
            Some(name) => format!("{:?}", name),
            None => "from $DISPLAY".to_string(),
        }
    }
}

impl<A: XlibApi> CursorSourceImpl for X11CursorSource<A> {
    fn poll(&mut self) -> Option<Position> {
        if self.unavailable {
            return None;
        }

        if self.connection.is_none() {
            self.connection = Some(self.connect()?);
        }

        let api = self.api.as_ref()?;
        let connection = self.connection.as_ref()?;
        api.query_pointer(connection)
    }

    fn release(&mut self) {
        let Some(connection) = self.connection.take() else {
            return;
        };

        if let Some(api) = &self.api {
            match api.close_connection(connection) {
                Ok(()) => debug!("Closed X11 display connection"),
                Err(err) => trace!("Ignoring error while closing X11 display: {err}"),
            }
        }
    }

    fn is_unavailable(&self) -> bool {
        self.unavailable
    }
}

impl<A: XlibApi> Drop for X11CursorSource<A> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::capture;
    use crate::platform::PlatformResult;
    use crate::CursorPositionProvider;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::ffi::CStr;
    use std::rc::Rc;

    #[derive(Default)]
    struct Script {
        library: Option<BindErrorKind>,
        displays: VecDeque<OpenResult>,
        queries: VecDeque<Option<Position>>,
        close_fails: bool,

        loads: usize,
        opens: usize,
        queries_made: usize,
        closes: usize,
        last_display_name: Option<String>,
    }

    #[derive(Clone, Copy)]
    enum BindErrorKind {
        Missing,
        BadSymbol,
    }

    #[derive(Clone, Copy)]
    enum OpenResult {
        Connected,
        NoDisplay,
        Failed,
    }

    struct ScriptedXlib {
        script: Rc<RefCell<Script>>,
    }

    struct ScriptedConnection {
        id: usize,
    }

    impl XlibApi for ScriptedXlib {
        type Connection = ScriptedConnection;

        fn open_connection(
            &self,
            display_name: Option<&CStr>,
        ) -> PlatformResult<Option<Self::Connection>> {
            let mut script = self.script.borrow_mut();
            script.opens += 1;
            script.last_display_name =
                display_name.map(|name| name.to_string_lossy().into_owned());
            let id = script.opens;
            match script.displays.pop_front().unwrap_or(OpenResult::Connected) {
                OpenResult::Connected => Ok(Some(ScriptedConnection { id })),
                OpenResult::NoDisplay => Ok(None),
                OpenResult::Failed => Err("protocol error".into()),
            }
        }

        fn query_pointer(&self, connection: &Self::Connection) -> Option<Position> {
            assert!(connection.id > 0);
            let mut script = self.script.borrow_mut();
            script.queries_made += 1;
            script.queries.pop_front().flatten()
        }

        fn close_connection(&self, _connection: Self::Connection) -> PlatformResult<()> {
            let mut script = self.script.borrow_mut();
            script.closes += 1;
            if script.close_fails {
                Err("close failed".into())
            } else {
                Ok(())
            }
        }
    }

    fn scripted(
        script: Script,
        display_name: Option<&str>,
    ) -> (X11CursorSource<ScriptedXlib>, Rc<RefCell<Script>>) {
        let script = Rc::new(RefCell::new(script));
        let loader_script = script.clone();
        let loader: XlibLoader<ScriptedXlib> = Box::new(move || {
            let mut state = loader_script.borrow_mut();
            state.loads += 1;
            match state.library {
                None => Ok(ScriptedXlib {
                    script: loader_script.clone(),
                }),
                Some(BindErrorKind::Missing) => {
                    Err(BindError::LibraryMissing("libX11.so.6".to_string()))
                }
                Some(BindErrorKind::BadSymbol) => {
                    Err(BindError::Unexpected("XQueryPointer".to_string()))
                }
            }
        });

        let display_name = display_name.map(|name| CString::new(name).unwrap());
        (X11CursorSource::with_loader(display_name, loader), script)
    }

    #[test]
    fn test_successful_queries_update_and_failures_keep_position() {
        let (source, script) = scripted(
            Script {
                queries: VecDeque::from([
                    Some(Position::new(120, 340)),
                    None,
                    Some(Position::new(121, 341)),
                ]),
                ..Default::default()
            },
            None,
        );
        let mut provider = CursorPositionProvider::from_source(source);

        provider.refresh();
        assert_eq!(provider.current_position(), Position::new(120, 340));

        provider.refresh();
        assert_eq!(provider.current_position(), Position::new(120, 340));

        provider.refresh();
        assert_eq!(provider.current_position(), Position::new(121, 341));

        let script = script.borrow();
        assert_eq!(script.loads, 1);
        assert_eq!(script.opens, 1);
        assert_eq!(script.queries_made, 3);
    }

    #[test]
    fn test_missing_library_is_permanent() {
        capture::start();
        let (source, script) = scripted(
            Script {
                library: Some(BindErrorKind::Missing),
                ..Default::default()
            },
            None,
        );
        let mut provider = CursorPositionProvider::from_source(source);

        provider.refresh();
        assert!(!provider.is_available());
        assert_eq!(provider.source().warnings().emitted(), 1);
        assert!(provider
            .source()
            .warnings()
            .is_issued(FailureClass::DependencyMissing));

        for _ in 0..10 {
            provider.refresh();
            assert_eq!(provider.current_position(), Position::default());
        }

        assert_eq!(provider.source().warnings().emitted(), 1);
        let logged = capture::warnings();
        assert_eq!(logged.len(), 1);
        assert!(logged[0].contains("X11 client library is not installed"));

        let script = script.borrow();
        assert_eq!(script.loads, 1);
        assert_eq!(script.opens, 0);
        assert_eq!(script.queries_made, 0);
    }

    #[test]
    fn test_unresolvable_symbol_is_permanent() {
        let (mut source, script) = scripted(
            Script {
                library: Some(BindErrorKind::BadSymbol),
                ..Default::default()
            },
            None,
        );

        for _ in 0..5 {
            assert_eq!(source.poll(), None);
        }

        assert!(source.is_unavailable());
        assert!(source.warnings().is_issued(FailureClass::Unexpected));
        assert_eq!(source.warnings().emitted(), 1);
        assert_eq!(script.borrow().loads, 1);
    }

    #[test]
    fn test_missing_display_is_retried_and_warned_once() {
        capture::start();
        let (mut source, script) = scripted(
            Script {
                displays: VecDeque::from([
                    OpenResult::NoDisplay,
                    OpenResult::NoDisplay,
                    OpenResult::NoDisplay,
                    OpenResult::Connected,
                ]),
                queries: VecDeque::from([Some(Position::new(5, 6))]),
                ..Default::default()
            },
            None,
        );

        for _ in 0..3 {
            assert_eq!(source.poll(), None);
            assert!(!source.is_unavailable());
            assert!(!source.is_connected());
        }
        assert_eq!(source.warnings().emitted(), 1);
        assert!(source
            .warnings()
            .is_issued(FailureClass::DisplayUnavailable));
        assert_eq!(capture::warnings().len(), 1);

        assert_eq!(source.poll(), Some(Position::new(5, 6)));
        assert!(source.is_connected());

        let script = script.borrow();
        assert_eq!(script.loads, 1);
        assert_eq!(script.opens, 4);
        assert_eq!(script.queries_made, 1);
    }

    #[test]
    fn test_open_error_is_permanent() {
        let (mut source, script) = scripted(
            Script {
                displays: VecDeque::from([OpenResult::Failed]),
                ..Default::default()
            },
            None,
        );

        assert_eq!(source.poll(), None);
        assert_eq!(source.poll(), None);

        assert!(source.is_unavailable());
        assert!(source.warnings().is_issued(FailureClass::Unexpected));
        assert_eq!(source.warnings().emitted(), 1);
        assert_eq!(script.borrow().opens, 1);
    }

    #[test]
    fn test_display_name_is_passed_to_open() {
        let (mut source, script) = scripted(Script::default(), Some(":1"));

        source.poll();
        assert_eq!(script.borrow().last_display_name.as_deref(), Some(":1"));
    }

    #[test]
    fn test_release_without_connection_is_noop() {
        let (mut source, script) = scripted(Script::default(), None);

        source.release();
        source.release();

        let script = script.borrow();
        assert_eq!(script.loads, 0);
        assert_eq!(script.closes, 0);
    }

    #[test]
    fn test_release_is_idempotent_and_allows_reopen() {
        let (mut source, script) = scripted(
            Script {
                queries: VecDeque::from([Some(Position::new(1, 2)), Some(Position::new(3, 4))]),
                ..Default::default()
            },
            None,
        );

        assert_eq!(source.poll(), Some(Position::new(1, 2)));
        source.release();
        source.release();
        assert!(!source.is_connected());
        assert_eq!(script.borrow().closes, 1);

        assert_eq!(source.poll(), Some(Position::new(3, 4)));
        let script = script.borrow();
        assert_eq!(script.loads, 1);
        assert_eq!(script.opens, 2);
    }

    #[test]
    fn test_close_error_is_swallowed() {
        let (mut source, script) = scripted(
            Script {
                close_fails: true,
                ..Default::default()
            },
            None,
        );

        source.poll();
        source.release();

        assert!(!source.is_connected());
        assert!(!source.is_unavailable());
        assert_eq!(source.warnings().emitted(), 0);
        assert_eq!(script.borrow().closes, 1);
    }

    #[test]
    fn test_drop_closes_connection() {
        let (mut source, script) = scripted(Script::default(), None);

        source.poll();
        drop(source);

        assert_eq!(script.borrow().closes, 1);
    }

    #[test]
    fn test_invalid_display_name_is_permanent() {
        let config = ProviderConfig {
            x11_display: Some(":0\0junk".to_string()),
            ..Default::default()
        };
        let mut source = X11CursorSource::from_config(&config);

        assert!(source.is_unavailable());
        assert_eq!(source.poll(), None);
        assert!(source.warnings().is_issued(FailureClass::Unexpected));
        assert_eq!(source.warnings().emitted(), 1);
    }
}
