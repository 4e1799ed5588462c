pub mod instructor;
pub mod learner;
pub mod operator;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学习者仪表盘
    pub async fn learner(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        learner::learner_dashboard(self, request).await
    }

    // 讲师仪表盘
    pub async fn instructor(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        instructor::instructor_dashboard(self, request).await
    }

    // 运营仪表盘
    pub async fn operator(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        operator::operator_dashboard(self, request).await
    }
}
