use globalcursor_core::CursorPositionProvider;
use std::thread;
use std::time::Duration;

fn main() {
    let mut provider = CursorPositionProvider::new();
    for _ in 0..20 {
        provider.refresh();
        println!("Mouse position: {}", provider.current_position());
        thread::sleep(Duration::from_millis(100));
    }
    provider.shutdown();
}
