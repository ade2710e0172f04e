pub trait EventQueue {
    fn send_message(&self, body: &str) -> Result<(), String>;
}

impl<F> EventQueue for F
where
    F: Fn(&str) -> Result<(), String>,
{
    fn send_message(&self, body: &str) -> Result<(), String> {
        self(body)
    }
}
