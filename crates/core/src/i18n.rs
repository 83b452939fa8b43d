use crate::types::language::InterfaceLanguage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    StatusReady,
    StatusGenerating,
    StatusGenerated,
    StatusError,
    StatusPosting,
    StatusPosted,
    StatusPostError,
    StatusHistoryLoaded,
    SuccessPosted,
    ErrorDuplicateDetected,
    ErrorUnknown,
    ErrorPostUnknown,
    ErrorConnection,
    ErrorHistoryLoad,
    ErrorTimeout,
    ErrorEmptyDraft,
    ErrorInvalidInput,
    ErrorBusy,
    ErrorSessionExpired,
    ErrorInvalidPassword,
    HistoryTitle,
    HistoryEmpty,
    HistoryPosted,
    AdLabel,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    language: InterfaceLanguage,
}

impl Translator {
    pub fn new(language: InterfaceLanguage) -> Self {
        Self { language }
    }

    pub fn language(&self) -> InterfaceLanguage {
        self.language
    }

    pub fn t(&self, key: MessageKey) -> &'static str {
        lookup(self.language, key).unwrap_or_else(|| english(key))
    }
}

pub fn lookup(language: InterfaceLanguage, key: MessageKey) -> Option<&'static str> {
    match language {
        InterfaceLanguage::En => Some(english(key)),
        InterfaceLanguage::Tr => turkish(key),
        InterfaceLanguage::Ru => russian(key),
        InterfaceLanguage::Zh => chinese(key),
        InterfaceLanguage::Ja => japanese(key),
    }
}

fn english(key: MessageKey) -> &'static str {
    use MessageKey::*;
    match key {
        StatusReady => "Ready. Paste a YouTube link to get started.",
        StatusGenerating => "Generating comment...",
        StatusGenerated => "Comment generated. Review it before posting.",
        StatusError => "Something went wrong.",
        StatusPosting => "Posting comment to YouTube...",
        StatusPosted => "Comment posted.",
        StatusPostError => "The comment could not be posted.",
        StatusHistoryLoaded => "Comment loaded from history.",
        SuccessPosted => "Your comment is live on YouTube!",
        ErrorDuplicateDetected => "This video was already handled before.",
        ErrorUnknown => "An unknown error occurred while generating the comment.",
        ErrorPostUnknown => "An unknown error occurred while posting the comment.",
        ErrorConnection => "Could not reach the server:",
        ErrorHistoryLoad => "Comment history could not be loaded.",
        ErrorTimeout => "The server took too long to answer. Please try again.",
        ErrorEmptyDraft => "There is no comment to post.",
        ErrorInvalidInput => "Please check the video link and language.",
        ErrorBusy => "Please wait for the current request to finish.",
        ErrorSessionExpired => "Your admin session has expired. Please log in again.",
        ErrorInvalidPassword => "Invalid password.",
        HistoryTitle => "Comment History",
        HistoryEmpty => "No history yet. Post a comment to see it here!",
        HistoryPosted => "Posted",
        AdLabel => "Ad",
    }
}

fn turkish(key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    let text = match key {
        StatusReady => "Hazır. Başlamak için bir YouTube bağlantısı yapıştırın.",
        StatusGenerating => "Yorum oluşturuluyor...",
        StatusGenerated => "Yorum oluşturuldu. Göndermeden önce kontrol edin.",
        StatusError => "Bir şeyler ters gitti.",
        StatusPosting => "Yorum YouTube'a gönderiliyor...",
        StatusPosted => "Yorum gönderildi.",
        StatusPostError => "Yorum gönderilemedi.",
        StatusHistoryLoaded => "Yorum geçmişten yüklendi.",
        SuccessPosted => "Yorumunuz YouTube'da yayında!",
        ErrorDuplicateDetected => "Bu video daha önce işlenmiş.",
        ErrorUnknown => "Yorum oluşturulurken bilinmeyen bir hata oluştu.",
        ErrorPostUnknown => "Yorum gönderilirken bilinmeyen bir hata oluştu.",
        ErrorConnection => "Sunucuya ulaşılamadı:",
        ErrorHistoryLoad => "Yorum geçmişi yüklenemedi.",
        ErrorTimeout => "Sunucu çok geç yanıt verdi. Lütfen tekrar deneyin.",
        ErrorEmptyDraft => "Gönderilecek bir yorum yok.",
        ErrorInvalidInput => "Lütfen video bağlantısını ve dili kontrol edin.",
        ErrorBusy => "Lütfen mevcut isteğin bitmesini bekleyin.",
        ErrorSessionExpired => "Yönetici oturumunuz sona erdi. Lütfen tekrar giriş yapın.",
        ErrorInvalidPassword => "Geçersiz şifre.",
        HistoryTitle => "Yorum Geçmişi",
        HistoryEmpty => "Henüz geçmiş yok. Burada görmek için bir yorum gönderin!",
        HistoryPosted => "Gönderildi",
        AdLabel => "Reklam",
    };
    Some(text)
}

fn russian(key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    let text = match key {
        StatusReady => "Готово. Вставьте ссылку на YouTube, чтобы начать.",
        StatusGenerating => "Создаём комментарий...",
        StatusGenerated => "Комментарий готов. Проверьте его перед публикацией.",
        StatusError => "Что-то пошло не так.",
        StatusPosting => "Публикуем комментарий на YouTube...",
        StatusPosted => "Комментарий опубликован.",
        StatusPostError => "Не удалось опубликовать комментарий.",
        StatusHistoryLoaded => "Комментарий загружен из истории.",
        SuccessPosted => "Ваш комментарий опубликован на YouTube!",
        ErrorDuplicateDetected => "Это видео уже обрабатывалось.",
        ErrorUnknown => "При создании комментария произошла неизвестная ошибка.",
        ErrorPostUnknown => "При публикации комментария произошла неизвестная ошибка.",
        ErrorConnection => "Не удалось связаться с сервером:",
        ErrorHistoryLoad => "Не удалось загрузить историю комментариев.",
        ErrorTimeout => "Сервер отвечает слишком долго. Попробуйте ещё раз.",
        ErrorEmptyDraft => "Нет комментария для публикации.",
        ErrorSessionExpired => "Сессия администратора истекла. Войдите снова.",
        ErrorInvalidPassword => "Неверный пароль.",
        HistoryTitle => "История комментариев",
        HistoryPosted => "Опубликовано",
        AdLabel => "Реклама",
        _ => return None,
    };
    Some(text)
}

fn chinese(key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    let text = match key {
        StatusReady => "准备就绪。粘贴 YouTube 链接即可开始。",
        StatusGenerating => "正在生成评论...",
        StatusGenerated => "评论已生成，发布前请先检查。",
        StatusError => "出错了。",
        StatusPosting => "正在发布评论到 YouTube...",
        StatusPosted => "评论已发布。",
        StatusPostError => "评论发布失败。",
        StatusHistoryLoaded => "已从历史记录载入评论。",
        SuccessPosted => "您的评论已在 YouTube 上发布！",
        ErrorDuplicateDetected => "该视频之前已处理过。",
        ErrorUnknown => "生成评论时发生未知错误。",
        ErrorPostUnknown => "发布评论时发生未知错误。",
        ErrorConnection => "无法连接服务器：",
        ErrorHistoryLoad => "无法加载评论历史。",
        ErrorTimeout => "服务器响应超时，请重试。",
        ErrorEmptyDraft => "没有可发布的评论。",
        ErrorSessionExpired => "管理员会话已过期，请重新登录。",
        ErrorInvalidPassword => "密码无效。",
        HistoryTitle => "评论历史",
        HistoryPosted => "已发布",
        AdLabel => "广告",
        _ => return None,
    };
    Some(text)
}

fn japanese(key: MessageKey) -> Option<&'static str> {
    use MessageKey::*;
    let text = match key {
        StatusReady => "準備完了。YouTube のリンクを貼り付けてください。",
        StatusGenerating => "コメントを生成しています...",
        StatusGenerated => "コメントを生成しました。投稿前に確認してください。",
        StatusError => "問題が発生しました。",
        StatusPosting => "YouTube にコメントを投稿しています...",
        StatusPosted => "コメントを投稿しました。",
        StatusPostError => "コメントを投稿できませんでした。",
        StatusHistoryLoaded => "履歴からコメントを読み込みました。",
        SuccessPosted => "コメントが YouTube に公開されました！",
        ErrorDuplicateDetected => "この動画は以前に処理済みです。",
        ErrorUnknown => "コメント生成中に不明なエラーが発生しました。",
        ErrorPostUnknown => "コメント投稿中に不明なエラーが発生しました。",
        ErrorConnection => "サーバーに接続できません：",
        ErrorHistoryLoad => "コメント履歴を読み込めませんでした。",
        ErrorTimeout => "サーバーの応答がタイムアウトしました。もう一度お試しください。",
        ErrorEmptyDraft => "投稿するコメントがありません。",
        ErrorSessionExpired => "管理者セッションの有効期限が切れました。再度ログインしてください。",
        ErrorInvalidPassword => "パスワードが正しくありません。",
        HistoryTitle => "コメント履歴",
        HistoryPosted => "投稿済み",
        AdLabel => "広告",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_covers_every_key() {
        let translator = Translator::default();
        assert_eq!(translator.language(), InterfaceLanguage::En);
        assert_eq!(translator.t(MessageKey::AdLabel), "Ad");
    }

    #[test]
    fn translated_key_uses_language() {
        let translator = Translator::new(InterfaceLanguage::Tr);
        assert_eq!(translator.t(MessageKey::AdLabel), "Reklam");
    }

    #[test]
    fn missing_key_falls_back_to_english() {
        assert_eq!(lookup(InterfaceLanguage::Ja, MessageKey::ErrorBusy), None);
        let translator = Translator::new(InterfaceLanguage::Ja);
        assert_eq!(
            translator.t(MessageKey::ErrorBusy),
            "Please wait for the current request to finish."
        );
    }
}
