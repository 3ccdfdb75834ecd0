use crate::config::chat_url;
use crate::error::Result;
use crate::server::browser::PostStartHook;

pub fn execute(port: u16, hook: &dyn PostStartHook) -> Result<()> {
    hook.on_started(&chat_url(port));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder(RefCell<Option<String>>);

    impl PostStartHook for Recorder {
        fn on_started(&self, url: &str) {
            *self.0.borrow_mut() = Some(url.to_string());
        }
    }

    #[test]
    fn test_view_opens_chat_on_port() {
        let recorder = Recorder(RefCell::new(None));
        execute(9000, &recorder).unwrap();
        assert_eq!(
            recorder.0.borrow().as_deref(),
            Some("http://localhost:9000/chat/index.html")
        );
    }
}
