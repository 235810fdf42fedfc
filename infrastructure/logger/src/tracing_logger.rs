use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "plan_recommender", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "plan_recommender", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "plan_recommender", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "plan_recommender", "{}", message);
    }
}
