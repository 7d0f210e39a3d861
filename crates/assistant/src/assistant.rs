//! Main assistant: dispatch and command handlers.

use assistant_core::{ChatModel, ModelError, NewTask, StoreError, TaskPatch, TaskStore, TaskVault};
use tracing::{debug, info, warn};

use crate::classifier::{is_delete_confirmation, Classifier};
use crate::context::{ConversationContext, LastAction, TaskHandle};
use crate::error::AssistantError;
use crate::intent::Intent;
use crate::prompts;
use crate::reply::Reply;
use crate::sanitize::sanitize;

/// Fixed reply for vault operations attempted while locked.
pub const VAULT_LOCKED_MSG: &str =
    "🔒 La bóveda está bloqueada. Desbloquéala con tu PIN para acceder a las tareas privadas.";

const NO_TARGET_MSG: &str =
    "⚠️ No sé a qué tarea te refieres. Indica el número, por ejemplo: actualiza la tarea #3";

const TITLE_REQUIRED_MSG: &str =
    "⚠️ Necesito un título para crear la tarea. Ejemplo: crea una tarea llamada Comprar pan";

const EMPTY_PATCH_MSG: &str =
    "⚠️ ¿Qué quieres cambiar? Puedes decir: marca la tarea #3 como completada";

/// The conversational command layer.
///
/// One sequential pipeline per utterance: sanitize, classify, dispatch
/// to a single handler (or the language-model fallback), format a
/// [`Reply`]. Collaborator failures are caught at [`Assistant::handle`]
/// and formatted; the method itself never fails.
///
/// The caller owns the [`ConversationContext`] and threads it through
/// successive calls; the caller is also responsible for serializing
/// calls (one outstanding utterance at a time).
pub struct Assistant<T: TaskStore, V: TaskVault, M: ChatModel> {
    tasks: T,
    vault: V,
    model: M,
    classifier: Classifier,
}

impl<T: TaskStore, V: TaskVault, M: ChatModel> Assistant<T, V, M> {
    /// Create an assistant over the three collaborators.
    pub fn new(tasks: T, vault: V, model: M) -> Self {
        Self {
            tasks,
            vault,
            model,
            classifier: Classifier::new(),
        }
    }

    /// Get the task-store collaborator.
    pub fn tasks(&self) -> &T {
        &self.tasks
    }

    /// Get the vault collaborator.
    pub fn vault(&self) -> &V {
        &self.vault
    }

    /// Handle one user utterance and produce a reply.
    ///
    /// This is the single entry point of the command layer. It never
    /// fails: validation problems become instructive replies and
    /// collaborator errors become categorized error replies.
    pub async fn handle(&self, text: &str, ctx: &mut ConversationContext) -> Reply {
        let clean = sanitize(text);
        if clean.is_empty() {
            return Reply::info("Escribe un mensaje y te ayudo con tus tareas.");
        }

        let intent = self.classifier.classify(&clean);
        debug!("Intent: {}", intent.description());

        match self.dispatch(intent, &clean, ctx).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Command failed: {}", e);
                failure_reply(e)
            }
        }
    }

    /// Ask the model for a one-line description for a task title.
    ///
    /// Quotes are stripped from the reply, as the suggestion is meant
    /// to be inserted verbatim into the description field.
    pub async fn suggest_description(&self, title: &str) -> Result<String, ModelError> {
        let prompt = prompts::suggestion_prompt(&sanitize(title));
        let raw = self.model.complete(&prompt).await?;
        Ok(raw.replace(['"', '\''], "").trim().to_string())
    }

    async fn dispatch(
        &self,
        intent: Intent,
        text: &str,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        match intent {
            Intent::ListTasks { include_vault } => self.handle_list(include_vault, ctx).await,
            Intent::CreateTask {
                title,
                description,
                is_vault,
            } => self.handle_create(title, description, is_vault, ctx).await,
            Intent::UpdateTask {
                task_id,
                patch,
                is_vault,
            } => self.handle_update(task_id, patch, is_vault, ctx).await,
            Intent::DeleteTask { task_id, is_vault } => {
                self.handle_delete_request(task_id, is_vault, ctx).await
            }
            Intent::MoveToVault { task_id } => self.handle_move(task_id, ctx).await,
            Intent::Granted => self.handle_granted(ctx).await,
            Intent::GeneralChat => self.handle_chat(text, ctx).await,
        }
    }

    async fn handle_list(
        &self,
        include_vault: bool,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        let tasks = self.tasks.list().await?;

        let mut lines = Vec::new();
        if tasks.is_empty() {
            lines.push("📋 No tienes tareas todavía.".to_string());
        } else {
            lines.push("📋 Tus tareas:".to_string());
            for (i, task) in tasks.iter().enumerate() {
                let marker = if task.completed { "✅" } else { "⬜" };
                let mut line = format!("{}. {} {} (#{})", i + 1, marker, task.title, task.id);
                if !task.description.is_empty() {
                    line.push_str(&format!(" - {}", task.description));
                }
                lines.push(line);
            }
        }

        if include_vault {
            if self.vault.is_unlocked() {
                let vault_tasks = self.vault.list().await?;
                if vault_tasks.is_empty() {
                    lines.push("🔐 La bóveda está vacía.".to_string());
                } else {
                    lines.push("🔐 Tareas privadas:".to_string());
                    for (i, task) in vault_tasks.iter().enumerate() {
                        let marker = if task.completed { "✅" } else { "⬜" };
                        lines.push(format!("{}. {} {}", i + 1, marker, task.title));
                    }
                }
            } else {
                lines.push(VAULT_LOCKED_MSG.to_string());
            }
        }

        ctx.remember_action(LastAction::Listed);
        Ok(Reply::info(lines.join("\n")))
    }

    async fn handle_create(
        &self,
        title: Option<String>,
        description: String,
        is_vault: bool,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        let Some(title) = title else {
            return Ok(Reply::warning(TITLE_REQUIRED_MSG));
        };

        if let Err(e) = assistant_core::validate_title(&title) {
            return Ok(Reply::warning(format!("⚠️ {}", e)));
        }
        if let Err(e) = assistant_core::validate_description(&description) {
            return Ok(Reply::warning(format!("⚠️ {}", e)));
        }

        if is_vault {
            if !self.vault.is_unlocked() {
                return Ok(Reply::warning(VAULT_LOCKED_MSG));
            }

            let created = self
                .vault
                .create(NewTask::new(title.as_str(), description.as_str()))
                .await?;
            info!("Created vault task from chat: {}", created.id);
            ctx.remember(TaskHandle::Vault(created.id), LastAction::Created);
            return Ok(Reply::success(format!(
                "✅ Tarea privada creada: \"{}\" 🔐",
                title
            )));
        }

        let created = self
            .tasks
            .create(NewTask::new(title.as_str(), description.as_str()))
            .await?;
        info!("Created task from chat: #{}", created.id);
        ctx.remember(TaskHandle::Server(created.id), LastAction::Created);
        Ok(Reply::success(format!(
            "✅ Tarea creada: \"{}\" (#{})",
            created.title, created.id
        )))
    }

    async fn handle_update(
        &self,
        task_id: Option<i64>,
        patch: TaskPatch,
        is_vault: bool,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        if patch.is_empty() {
            return Ok(Reply::warning(EMPTY_PATCH_MSG));
        }

        if let Some(ref title) = patch.title {
            if let Err(e) = assistant_core::validate_title(title) {
                return Ok(Reply::warning(format!("⚠️ {}", e)));
            }
        }
        if let Some(ref description) = patch.description {
            if let Err(e) = assistant_core::validate_description(description) {
                return Ok(Reply::warning(format!("⚠️ {}", e)));
            }
        }

        let handle = match self.resolve_target(task_id, is_vault, ctx).await? {
            Ok(handle) => handle,
            Err(reply) => return Ok(reply),
        };

        if handle.is_vault() && !self.vault.is_unlocked() {
            return Ok(Reply::warning(VAULT_LOCKED_MSG));
        }

        match &handle {
            TaskHandle::Server(id) => {
                let updated = self.tasks.update(*id, patch).await?;
                ctx.remember(handle.clone(), LastAction::Updated);
                Ok(Reply::success(format!(
                    "✅ Tarea #{} actualizada: \"{}\"",
                    id, updated.title
                )))
            }
            TaskHandle::Vault(id) => {
                let updated = self.vault.update(id, patch).await?;
                ctx.remember(handle.clone(), LastAction::Updated);
                Ok(Reply::success(format!(
                    "✅ Tarea privada actualizada: \"{}\"",
                    updated.title
                )))
            }
        }
    }

    /// First phase of the deletion protocol: no mutation, only a
    /// confirmation question and the pending state in the context.
    async fn handle_delete_request(
        &self,
        task_id: Option<i64>,
        is_vault: bool,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        let handle = match self.resolve_target(task_id, is_vault, ctx).await? {
            Ok(handle) => handle,
            Err(reply) => return Ok(reply),
        };

        if handle.is_vault() && !self.vault.is_unlocked() {
            return Ok(Reply::warning(VAULT_LOCKED_MSG));
        }

        let label = handle.label();
        ctx.remember(handle, LastAction::DeleteRequested);

        Ok(Reply::warning(format!(
            "⚠️ ¿Seguro que quieres eliminar la tarea {}? Responde \"sí, confirmo\" para eliminarla.",
            label
        )))
    }

    async fn handle_move(
        &self,
        task_id: Option<i64>,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        let id = match task_id {
            Some(id) => id,
            None => match ctx.last_task.clone() {
                Some(TaskHandle::Server(id)) => id,
                Some(TaskHandle::Vault(_)) => {
                    return Ok(Reply::info("Esa tarea ya está en la bóveda. 🔐"));
                }
                None => return Ok(Reply::warning(NO_TARGET_MSG)),
            },
        };

        self.move_to_vault(id, ctx).await
    }

    /// The "concedido" shortcut: moves the last-mentioned backend task
    /// into the vault without a confirmation round-trip. Requires a
    /// last-mentioned task and an unlocked vault; each missing
    /// condition gets its own explanatory, non-mutating reply.
    async fn handle_granted(&self, ctx: &mut ConversationContext) -> Result<Reply, AssistantError> {
        let Some(handle) = ctx.last_task.clone() else {
            return Ok(Reply::warning(
                "⚠️ No hay ninguna tarea reciente que conceder. Menciona primero una tarea.",
            ));
        };

        let TaskHandle::Server(id) = handle else {
            return Ok(Reply::info("Esa tarea ya está en la bóveda. 🔐"));
        };

        if !self.vault.is_unlocked() {
            return Ok(Reply::warning(
                "🔒 La bóveda está bloqueada. Desbloquéala antes de conceder el traslado.",
            ));
        }

        info!("Granted shortcut: moving task #{} to vault", id);
        self.move_to_vault(id, ctx).await
    }

    /// Copy into the vault, then delete from the backend, in that order.
    ///
    /// Not atomic: a failed delete after a successful copy leaves the
    /// task in both stores. That outcome is reported, not rolled back.
    async fn move_to_vault(
        &self,
        id: i64,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        if !self.vault.is_unlocked() {
            return Ok(Reply::warning(VAULT_LOCKED_MSG));
        }

        let task = self.tasks.get(id).await?;

        let copied = self
            .vault
            .create(NewTask {
                title: task.title,
                description: task.description,
                completed: task.completed,
            })
            .await?;

        if let Err(e) = self.tasks.delete(id).await {
            warn!("Move to vault left task #{} duplicated: {}", id, e);
            ctx.remember(TaskHandle::Vault(copied.id), LastAction::MovedToVault);
            return Ok(Reply::warning(format!(
                "⚠️ La tarea se copió a la bóveda, pero no se pudo eliminar la original (#{}). \
Ahora existe en ambos lugares.",
                id
            )));
        }

        info!("Moved task #{} to vault as {}", id, copied.id);
        ctx.remember(TaskHandle::Vault(copied.id), LastAction::MovedToVault);
        Ok(Reply::success(format!(
            "✅ Tarea #{} movida a la bóveda. 🔐",
            id
        )))
    }

    /// Fallback chat, which doubles as the second phase of the
    /// deletion protocol: an affirmative-plus-"confirmo" utterance
    /// executes the pending delete instead of reaching the model.
    async fn handle_chat(
        &self,
        text: &str,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        let lower = text.to_lowercase();
        if is_delete_confirmation(&lower) && ctx.delete_pending() {
            return self.execute_pending_delete(ctx).await;
        }

        let prompt = prompts::chat_prompt(text);
        let answer = self.model.complete(&prompt).await?;
        Ok(Reply::info(answer.trim().to_string()))
    }

    async fn execute_pending_delete(
        &self,
        ctx: &mut ConversationContext,
    ) -> Result<Reply, AssistantError> {
        let Some(handle) = ctx.last_task.clone() else {
            return Ok(Reply::warning(NO_TARGET_MSG));
        };

        match &handle {
            TaskHandle::Server(id) => self.tasks.delete(*id).await?,
            TaskHandle::Vault(id) => {
                if !self.vault.is_unlocked() {
                    return Ok(Reply::warning(VAULT_LOCKED_MSG));
                }
                self.vault.delete(id).await?;
            }
        }

        info!("Confirmed deletion of task {}", handle.label());
        ctx.remember_action(LastAction::Deleted);
        Ok(Reply::success(format!(
            "✅ Tarea {} eliminada.",
            handle.label()
        )))
    }

    /// Resolve the target of an update/delete: explicit id, or the
    /// context's last-mentioned task.
    ///
    /// Numeric references to vault tasks are positions in the vault
    /// list (their real ids are opaque strings the user never sees).
    async fn resolve_target(
        &self,
        task_id: Option<i64>,
        is_vault: bool,
        ctx: &ConversationContext,
    ) -> Result<Result<TaskHandle, Reply>, AssistantError> {
        match (task_id, is_vault) {
            (Some(id), false) => Ok(Ok(TaskHandle::Server(id))),
            (Some(position), true) => {
                if !self.vault.is_unlocked() {
                    return Ok(Err(Reply::warning(VAULT_LOCKED_MSG)));
                }
                let tasks = self.vault.list().await?;
                match usize::try_from(position)
                    .ok()
                    .filter(|p| *p >= 1)
                    .and_then(|p| tasks.get(p - 1))
                {
                    Some(task) => Ok(Ok(TaskHandle::Vault(task.id.clone()))),
                    None => Ok(Err(Reply::warning(format!(
                        "⚠️ No encontré la tarea privada número {}.",
                        position
                    )))),
                }
            }
            (None, _) => match ctx.last_task.clone() {
                Some(handle) => Ok(Ok(handle)),
                None => Ok(Err(Reply::warning(NO_TARGET_MSG))),
            },
        }
    }
}

/// Turn a collaborator failure into a categorized user-facing reply.
fn failure_reply(error: AssistantError) -> Reply {
    match error {
        AssistantError::Store(e) => match e {
            StoreError::Network(_) => Reply::error(
                "🚫 No se puede conectar al servidor de tareas. Verifica que esté corriendo e intenta de nuevo.",
            ),
            StoreError::NotFound { id } => {
                Reply::error(format!("❌ No encontré la tarea {}.", id))
            }
            StoreError::Locked => Reply::warning(VAULT_LOCKED_MSG),
            StoreError::Server { status, .. } => {
                Reply::error(format!("❌ Error del servidor: {}", status))
            }
            other => Reply::error(format!("❌ Error de almacenamiento: {}", other)),
        },
        AssistantError::Model(e) => match e {
            ModelError::InvalidApiKey => Reply::error(
                "❌ API Key inválida. Genera una nueva en https://aistudio.google.com/app/apikey y actualiza tu .env.",
            ),
            ModelError::QuotaExceeded => {
                Reply::error("❌ Límite de uso excedido. Espera unos minutos e intenta de nuevo.")
            }
            ModelError::SafetyBlocked => Reply::warning(
                "⚠️ El mensaje fue bloqueado por políticas de seguridad. Intenta reformular tu pregunta.",
            ),
            ModelError::Network(_) => {
                Reply::error("🚫 No se puede conectar con el asistente. Verifica tu conexión.")
            }
            other => Reply::error(format!("❌ Error al comunicarse con el asistente: {}", other)),
        },
    }
}
