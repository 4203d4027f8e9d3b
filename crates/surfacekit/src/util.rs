use std::any::Any;

#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    next_id: u64,
}

impl IdGenerator {
    pub fn next(&mut self) -> u64 {
        let id = self.next_id;

        if self.next_id == u64::MAX {
            panic!("no more listener IDs available!");
        }

        self.next_id += 1;

        return id;
    }
}

/// Extract the message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        String::from("unknown panic")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generator() {
        let mut ids = IdGenerator::default();

        assert_eq!(ids.next(), 0);
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
    }

    #[test]
    fn test_panic_message() {
        let res = std::panic::catch_unwind(|| panic!("static message"));
        assert_eq!(panic_message(res.unwrap_err().as_ref()), "static message");

        let res = std::panic::catch_unwind(|| panic!("formatted {}", 5));
        assert_eq!(panic_message(res.unwrap_err().as_ref()), "formatted 5");
    }
}
