//! HTTP client for the POS REST API

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::client::{
    ChangePasswordRequest, HealthResponse, LoginRequest, LoginResponse, TokenResponse, UserInfo,
};
use shared::models::{
    Availability, Bill, BillCreate, BillQuery, BillUpdate, Category, CategoryCreate,
    CategoryQuery, CategoryUpdate, DashboardStats, DiningTable, DiningTableCreate,
    DiningTableQuery, DiningTableUpdate, Menu, MenuCreate, MenuQuery, MenuUpdate, OrderCreate,
    OrderCreated, OrderDetail, OrderItem, OrderItemCreate, OrderItemQuery, OrderItemUpdate,
    OrderQuery, OrderSummary, OrderUpdate, PayOrderRequest, PaymentReceipt, User, UserCreate,
    UserUpdate, Zone, ZoneCreate, ZoneUpdate,
};

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for the POS server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %text, "API request failed");
            return Err(ClientError::from_response(status.as_u16(), &text));
        }
        serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.request(Method::GET, path)).await
    }

    /// GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::GET, path).query(query)).await
    }

    /// POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::POST, path).json(body)).await
    }

    /// POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.request(Method::POST, path)).await
    }

    /// PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::PATCH, path).json(body)).await
    }

    /// PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        Self::send(self.request(Method::PUT, path).json(body)).await
    }

    /// DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        Self::send(self.request(Method::DELETE, path)).await
    }

    // ========== Health ==========

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.get("/health").await
    }

    // ========== Auth API ==========

    /// Login and keep the token for later calls
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/api/auth/login", &request).await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    /// Forget the token
    pub fn logout(&mut self) {
        self.token = None;
    }

    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("/api/auth/me").await
    }

    /// Swap the current token for a fresh one
    pub async fn refresh_token(&mut self) -> ClientResult<String> {
        let response: TokenResponse = self.post_empty("/api/auth/refresh").await?;
        self.token = Some(response.token.clone());
        Ok(response.token)
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ClientResult<bool> {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.post("/api/auth/change-password", &request).await
    }

    // ========== Categories ==========

    pub async fn list_categories(&self, status: Option<Availability>) -> ClientResult<Vec<Category>> {
        self.get_with_query("/api/categories", &CategoryQuery { status })
            .await
    }

    pub async fn get_category(&self, id: i64) -> ClientResult<Category> {
        self.get(&format!("/api/categories/{id}")).await
    }

    pub async fn create_category(&self, data: &CategoryCreate) -> ClientResult<Category> {
        self.post("/api/categories", data).await
    }

    pub async fn update_category(&self, id: i64, data: &CategoryUpdate) -> ClientResult<Category> {
        self.patch(&format!("/api/categories/{id}"), data).await
    }

    pub async fn delete_category(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/api/categories/{id}")).await
    }

    // ========== Menus ==========

    pub async fn list_menus(&self, query: &MenuQuery) -> ClientResult<Vec<Menu>> {
        self.get_with_query("/api/menus", query).await
    }

    pub async fn get_menu(&self, id: i64) -> ClientResult<Menu> {
        self.get(&format!("/api/menus/{id}")).await
    }

    pub async fn create_menu(&self, data: &MenuCreate) -> ClientResult<Menu> {
        self.post("/api/menus", data).await
    }

    pub async fn update_menu(&self, id: i64, data: &MenuUpdate) -> ClientResult<Menu> {
        self.patch(&format!("/api/menus/{id}"), data).await
    }

    /// Status-only toggle
    pub async fn set_menu_status(&self, id: i64, status: Availability) -> ClientResult<Menu> {
        let data = MenuUpdate {
            status: Some(status),
            ..Default::default()
        };
        self.update_menu(id, &data).await
    }

    pub async fn delete_menu(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/api/menus/{id}")).await
    }

    // ========== Zones ==========

    pub async fn list_zones(&self) -> ClientResult<Vec<Zone>> {
        self.get("/api/zones").await
    }

    pub async fn get_zone(&self, id: i64) -> ClientResult<Zone> {
        self.get(&format!("/api/zones/{id}")).await
    }

    pub async fn list_zone_tables(&self, id: i64) -> ClientResult<Vec<DiningTable>> {
        self.get(&format!("/api/zones/{id}/tables")).await
    }

    pub async fn create_zone(&self, data: &ZoneCreate) -> ClientResult<Zone> {
        self.post("/api/zones", data).await
    }

    pub async fn update_zone(&self, id: i64, data: &ZoneUpdate) -> ClientResult<Zone> {
        self.patch(&format!("/api/zones/{id}"), data).await
    }

    pub async fn delete_zone(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/api/zones/{id}")).await
    }

    // ========== Tables ==========

    pub async fn list_tables(&self, query: &DiningTableQuery) -> ClientResult<Vec<DiningTable>> {
        self.get_with_query("/api/table", query).await
    }

    pub async fn get_table(&self, id: i64) -> ClientResult<DiningTable> {
        self.get(&format!("/api/table/{id}")).await
    }

    pub async fn create_table(&self, data: &DiningTableCreate) -> ClientResult<DiningTable> {
        self.post("/api/table", data).await
    }

    pub async fn update_table(&self, id: i64, data: &DiningTableUpdate) -> ClientResult<DiningTable> {
        self.patch(&format!("/api/table/{id}"), data).await
    }

    pub async fn delete_table(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/api/table/{id}")).await
    }

    // ========== Orders ==========

    pub async fn list_orders(&self, query: &OrderQuery) -> ClientResult<Vec<OrderSummary>> {
        self.get_with_query("/api/order", query).await
    }

    pub async fn get_order(&self, id: i64) -> ClientResult<OrderDetail> {
        self.get(&format!("/api/order/{id}")).await
    }

    pub async fn create_order(&self, data: &OrderCreate) -> ClientResult<OrderCreated> {
        self.post("/api/order", data).await
    }

    pub async fn update_order(&self, id: i64, data: &OrderUpdate) -> ClientResult<OrderDetail> {
        self.patch(&format!("/api/order/{id}"), data).await
    }

    pub async fn delete_order(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/api/order/{id}")).await
    }

    /// Settle an order in one call
    pub async fn pay_order(&self, id: i64, data: &PayOrderRequest) -> ClientResult<PaymentReceipt> {
        self.post(&format!("/api/order/{id}/pay"), data).await
    }

    // ========== Order items ==========

    pub async fn list_order_items(&self, order_id: Option<i64>) -> ClientResult<Vec<OrderItem>> {
        self.get_with_query("/api/order_items", &OrderItemQuery { order_id })
            .await
    }

    pub async fn get_order_item(&self, id: i64) -> ClientResult<OrderItem> {
        self.get(&format!("/api/order_items/{id}")).await
    }

    pub async fn create_order_item(&self, data: &OrderItemCreate) -> ClientResult<OrderItem> {
        self.post("/api/order_items", data).await
    }

    pub async fn update_order_item(&self, id: i64, data: &OrderItemUpdate) -> ClientResult<OrderItem> {
        self.patch(&format!("/api/order_items/{id}"), data).await
    }

    pub async fn delete_order_item(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/api/order_items/{id}")).await
    }

    // ========== Bills ==========

    pub async fn list_bills(&self, query: &BillQuery) -> ClientResult<Vec<Bill>> {
        self.get_with_query("/api/bills", query).await
    }

    pub async fn get_bill(&self, id: i64) -> ClientResult<Bill> {
        self.get(&format!("/api/bills/{id}")).await
    }

    pub async fn create_bill(&self, data: &BillCreate) -> ClientResult<Bill> {
        self.post("/api/bills", data).await
    }

    pub async fn update_bill(&self, id: i64, data: &BillUpdate) -> ClientResult<Bill> {
        self.patch(&format!("/api/bills/{id}"), data).await
    }

    pub async fn delete_bill(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/api/bills/{id}")).await
    }

    // ========== Cashiers (admin) ==========

    pub async fn list_cashiers(&self) -> ClientResult<Vec<User>> {
        self.get("/api/cashiers").await
    }

    pub async fn get_cashier(&self, id: i64) -> ClientResult<User> {
        self.get(&format!("/api/cashiers/{id}")).await
    }

    pub async fn create_cashier(&self, data: &UserCreate) -> ClientResult<User> {
        self.post("/api/cashiers", data).await
    }

    pub async fn update_cashier(&self, id: i64, data: &UserUpdate) -> ClientResult<User> {
        self.patch(&format!("/api/cashiers/{id}"), data).await
    }

    pub async fn delete_cashier(&self, id: i64) -> ClientResult<bool> {
        self.delete(&format!("/api/cashiers/{id}")).await
    }

    // ========== Dashboard ==========

    pub async fn dashboard(&self) -> ClientResult<DashboardStats> {
        self.get("/api/dashboard").await
    }
}
