pub mod postgres;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::audit::ActorContext;
use account_service::audit::AuditTrail;
use account_service::bootstrap::bootstrap_administrator;
use account_service::config::BootstrapConfig;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::role::errors::RoleError;
use account_service::role::models::NewRole;
use account_service::role::models::Role;
use account_service::role::models::RoleId;
use account_service::role::models::RoleName;
use account_service::role::ports::RoleRepository;
use account_service::role::service::RoleService;
use account_service::user::errors::UserError;
use account_service::user::models::CompanyId;
use account_service::user::models::EmailAddress;
use account_service::user::models::FullName;
use account_service::user::models::NewUser;
use account_service::user::models::User;
use account_service::user::models::UserField;
use account_service::user::models::UserId;
use account_service::user::models::UserStatus;
use account_service::user::ports::UserRepository;
use account_service::user::ports::UserServicePort;
use account_service::user::service::UserService;
use async_trait::async_trait;
use auth::Identity;
use auth::PasswordCredential;
use auth::TokenIssuer;
use chrono::Utc;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_ROLE: &str = "Administrator";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-pass_word!";

/// Tables shared by the in-memory repositories, mirroring the SQL schema
/// constraints (unique email and company id, role foreign key).
#[derive(Default)]
pub struct Tables {
    roles: BTreeMap<i32, Role>,
    users: BTreeMap<i32, User>,
    next_role_id: i32,
    next_user_id: i32,
}

impl Tables {
    fn with_role(&self, mut user: User) -> User {
        user.role = self.roles.get(&user.role_id.0).cloned();
        user
    }

    fn email_taken(&self, except: Option<UserId>, email: &EmailAddress) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email == *email)
    }

    fn company_id_taken(&self, except: Option<UserId>, company_id: CompanyId) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.company_id == company_id)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Clone, Default)]
pub struct InMemoryRoleRepository {
    tables: Arc<Mutex<Tables>>,
}

/// Fresh user and role repositories backed by the same tables.
pub fn repositories() -> (InMemoryUserRepository, InMemoryRoleRepository) {
    let tables = Arc::new(Mutex::new(Tables::default()));
    (
        InMemoryUserRepository {
            tables: Arc::clone(&tables),
        },
        InMemoryRoleRepository { tables },
    )
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        user: NewUser,
        credential: PasswordCredential,
        actor: &ActorContext,
    ) -> Result<User, UserError> {
        let mut tables = self.tables.lock().unwrap();

        if tables.email_taken(None, &user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        if tables.company_id_taken(None, user.company_id) {
            return Err(UserError::CompanyIdAlreadyExists(user.company_id));
        }
        if !tables.roles.contains_key(&user.role_id.0) {
            return Err(UserError::UnknownRole(user.role_id));
        }

        tables.next_user_id += 1;
        let stored = User {
            id: UserId(tables.next_user_id),
            full_name: user.full_name,
            email: user.email,
            position: user.position,
            role_id: user.role_id,
            role: None,
            company_id: user.company_id,
            status: user.status,
            credential: Some(credential),
            audit: AuditTrail::created(actor, Utc::now()),
        };
        tables.users.insert(stored.id.0, stored.clone());

        Ok(tables.with_role(stored))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.get(&id.0).cloned().map(|u| tables.with_role(u)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned()
            .map(|u| tables.with_role(u)))
    }

    async fn find_by_company_id(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<User>, UserError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .values()
            .find(|u| u.company_id == company_id)
            .cloned()
            .map(|u| tables.with_role(u)))
    }

    async fn find_all_with_role(&self) -> Result<Vec<User>, UserError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .values()
            .cloned()
            .map(|u| tables.with_role(u))
            .collect())
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<User>, UserError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .values()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .map(|u| tables.with_role(u))
            .collect())
    }

    async fn update_partial(
        &self,
        user: &User,
        fields: &[UserField],
        actor: &ActorContext,
    ) -> Result<(), UserError> {
        let mut tables = self.tables.lock().unwrap();

        if fields.contains(&UserField::Email) && tables.email_taken(Some(user.id), &user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }
        if fields.contains(&UserField::CompanyId)
            && tables.company_id_taken(Some(user.id), user.company_id)
        {
            return Err(UserError::CompanyIdAlreadyExists(user.company_id));
        }
        if fields.contains(&UserField::Role) && !tables.roles.contains_key(&user.role_id.0) {
            return Err(UserError::UnknownRole(user.role_id));
        }

        let stored = tables
            .users
            .get_mut(&user.id.0)
            .ok_or(UserError::NotFound(user.id))?;

        for field in fields {
            match field {
                UserField::FullName => stored.full_name = user.full_name.clone(),
                UserField::Email => stored.email = user.email.clone(),
                UserField::Position => stored.position = user.position.clone(),
                UserField::CompanyId => stored.company_id = user.company_id,
                UserField::Role => stored.role_id = user.role_id,
                UserField::Status => stored.status = user.status,
                UserField::Credential => stored.credential = user.credential.clone(),
            }
        }
        stored.audit.touch(actor, Utc::now());

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserError> {
        Ok(self.tables.lock().unwrap().users.remove(&id.0).is_some())
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn create(&self, role: NewRole) -> Result<Role, RoleError> {
        let mut tables = self.tables.lock().unwrap();

        if tables.roles.values().any(|r| r.name == role.name) {
            return Err(RoleError::NameAlreadyExists(role.name.to_string()));
        }

        tables.next_role_id += 1;
        let stored = Role {
            id: RoleId(tables.next_role_id),
            name: role.name,
            description: role.description,
        };
        tables.roles.insert(stored.id.0, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, RoleError> {
        Ok(self.tables.lock().unwrap().roles.get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Role>, RoleError> {
        Ok(self.tables.lock().unwrap().roles.values().cloned().collect())
    }

    async fn count_users(&self, id: RoleId) -> Result<i64, RoleError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.values().filter(|u| u.role_id == id).count() as i64)
    }

    async fn delete(&self, id: RoleId) -> Result<bool, RoleError> {
        Ok(self.tables.lock().unwrap().roles.remove(&id.0).is_some())
    }
}

/// Startup settings for the administrator every test app begins with.
pub fn bootstrap_settings() -> BootstrapConfig {
    BootstrapConfig {
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        admin_name: "Root Admin".to_string(),
        admin_company_id: 1,
    }
}

pub fn new_user(full_name: &str, email: &str, role_id: RoleId, company_id: i32) -> NewUser {
    NewUser {
        full_name: FullName::new(full_name.to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        position: None,
        role_id,
        company_id: CompanyId(company_id),
        status: UserStatus::Active,
    }
}

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
    pub user_service: Arc<UserService<InMemoryUserRepository>>,
    pub admin_role_id: RoleId,
    pub manager_role_id: RoleId,
    pub admin: User,
}

impl TestApp {
    /// Spawn the application in a background task with an administrator
    /// role, a manager role and one administrator account.
    pub async fn spawn() -> Self {
        let (user_repository, role_repository) = repositories();

        let admin_role = role_repository
            .create(NewRole {
                name: RoleName::new(ADMIN_ROLE.to_string()).unwrap(),
                description: None,
            })
            .await
            .expect("Failed to seed administrator role");
        let manager_role = role_repository
            .create(NewRole {
                name: RoleName::new("Manager".to_string()).unwrap(),
                description: Some("Team lead".to_string()),
            })
            .await
            .expect("Failed to seed manager role");

        let user_service = Arc::new(UserService::new(Arc::new(user_repository)));
        let role_service = Arc::new(RoleService::new(Arc::new(role_repository)));

        let admin = bootstrap_administrator(
            &*user_service,
            &*role_service,
            ADMIN_ROLE,
            &bootstrap_settings(),
        )
        .await
        .expect("Failed to bootstrap administrator")
        .expect("Administrator already present on a fresh store");

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let state = AppState {
            user_service: user_service.clone(),
            role_service,
            token_issuer: Arc::new(TokenIssuer::new(JWT_SECRET)),
            admin_role: ADMIN_ROLE.to_string(),
        };
        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(JWT_SECRET),
            user_service,
            admin_role_id: admin_role.id,
            manager_role_id: manager_role.id,
            admin,
        }
    }

    /// Token for the seeded administrator.
    pub fn admin_token(&self) -> String {
        self.token_for(&self.admin.identity())
    }

    pub fn token_for(&self, identity: &Identity) -> String {
        self.token_issuer
            .issue(identity)
            .expect("Failed to issue test token")
            .access_token
    }

    /// Register a user directly through the service, bypassing HTTP.
    pub async fn seed_user(&self, email: &str, company_id: i32, password: &str) -> User {
        self.user_service
            .register(
                new_user("Seeded User", email, self.manager_role_id, company_id),
                password,
                &ActorContext::system(),
            )
            .await
            .expect("Failed to seed user")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path)).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }
}
