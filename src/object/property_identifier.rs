crate::generate_custom_enum!(
    /// BACnet property identifiers (BACnetPropertyIdentifier).
    ///
    /// Values 512 to 4194303 are vendor proprietary. `All`, `Required` and `Optional`
    /// only appear in requests and never carry a value.
    PropertyIdentifier {
        AckedTransitions = 0,
        AckRequired = 1,
        Action = 2,
        ActionText = 3,
        ActiveText = 4,
        ActiveVtSessions = 5,
        AlarmValue = 6,
        AlarmValues = 7,
        All = 8,
        AllWritesSuccessful = 9,
        ApduSegmentTimeout = 10,
        ApduTimeout = 11,
        ApplicationSoftwareVersion = 12,
        Archive = 13,
        Bias = 14,
        ChangeOfStateCount = 15,
        ChangeOfStateTime = 16,
        NotificationClass = 17,
        ControlledVariableReference = 19,
        ControlledVariableUnits = 20,
        ControlledVariableValue = 21,
        CovIncrement = 22,
        DateList = 23,
        DaylightSavingsStatus = 24,
        Deadband = 25,
        DerivativeConstant = 26,
        DerivativeConstantUnits = 27,
        Description = 28,
        DescriptionOfHalt = 29,
        DeviceAddressBinding = 30,
        DeviceType = 31,
        EffectivePeriod = 32,
        ElapsedActiveTime = 33,
        ErrorLimit = 34,
        EventEnable = 35,
        EventState = 36,
        EventType = 37,
        ExceptionSchedule = 38,
        FaultValues = 39,
        FeedbackValue = 40,
        FileAccessMethod = 41,
        FileSize = 42,
        FileType = 43,
        FirmwareRevision = 44,
        HighLimit = 45,
        InactiveText = 46,
        InProcess = 47,
        InstanceOf = 48,
        IntegralConstant = 49,
        IntegralConstantUnits = 50,
        LimitEnable = 52,
        ListOfGroupMembers = 53,
        ListOfObjectPropertyReferences = 54,
        LocalDate = 56,
        LocalTime = 57,
        Location = 58,
        LowLimit = 59,
        ManipulatedVariableReference = 60,
        MaximumOutput = 61,
        MaxApduLengthAccepted = 62,
        MaxInfoFrames = 63,
        MaxMaster = 64,
        MaxPresValue = 65,
        MinimumOffTime = 66,
        MinimumOnTime = 67,
        MinimumOutput = 68,
        MinPresValue = 69,
        ModelName = 70,
        ModificationDate = 71,
        NotifyType = 72,
        NumberOfApduRetries = 73,
        NumberOfStates = 74,
        ObjectIdentifier = 75,
        ObjectList = 76,
        ObjectName = 77,
        ObjectPropertyReference = 78,
        ObjectType = 79,
        Optional = 80,
        OutOfService = 81,
        OutputUnits = 82,
        EventParameters = 83,
        Polarity = 84,
        PresentValue = 85,
        Priority = 86,
        PriorityArray = 87,
        PriorityForWriting = 88,
        ProcessIdentifier = 89,
        ProgramChange = 90,
        ProgramLocation = 91,
        ProgramState = 92,
        ProportionalConstant = 93,
        ProportionalConstantUnits = 94,
        ProtocolObjectTypesSupported = 96,
        ProtocolServicesSupported = 97,
        ProtocolVersion = 98,
        ReadOnly = 99,
        ReasonForHalt = 100,
        RecipientList = 102,
        Reliability = 103,
        RelinquishDefault = 104,
        Required = 105,
        Resolution = 106,
        SegmentationSupported = 107,
        Setpoint = 108,
        SetpointReference = 109,
        StateText = 110,
        StatusFlags = 111,
        SystemStatus = 112,
        TimeDelay = 113,
        TimeOfActiveTimeReset = 114,
        TimeOfStateCountReset = 115,
        TimeSynchronizationRecipients = 116,
        Units = 117,
        UpdateInterval = 118,
        UtcOffset = 119,
        VendorIdentifier = 120,
        VendorName = 121,
        VtClassesSupported = 122,
        WeeklySchedule = 123,
        AttemptedSamples = 124,
        AverageValue = 125,
        BufferSize = 126,
        ClientCovIncrement = 127,
        CovResubscriptionInterval = 128,
        EventTimeStamps = 130,
        LogBuffer = 131,
        LogDeviceObjectProperty = 132,
        Enable = 133,
        LogInterval = 134,
        MaximumValue = 135,
        MinimumValue = 136,
        NotificationThreshold = 137,
        ProtocolRevision = 139,
        RecordsSinceNotification = 140,
        RecordCount = 141,
        StartTime = 142,
        StopTime = 143,
        StopWhenFull = 144,
        TotalRecordCount = 145,
        ValidSamples = 146,
        WindowInterval = 147,
        WindowSamples = 148,
        MaximumValueTimestamp = 149,
        MinimumValueTimestamp = 150,
        VarianceValue = 151,
        ActiveCovSubscriptions = 152,
        BackupFailureTimeout = 153,
        ConfigurationFiles = 154,
        DatabaseRevision = 155,
        DirectReading = 156,
        LastRestoreTime = 157,
        MaintenanceRequired = 158,
        MemberOf = 159,
        Mode = 160,
        OperationExpected = 161,
        Setting = 162,
        Silenced = 163,
        TrackingValue = 164,
        ZoneMembers = 165,
        LifeSafetyAlarmValues = 166,
        MaxSegmentsAccepted = 167,
        ProfileName = 168,
        AutoSlaveDiscovery = 169,
        ManualSlaveAddressBinding = 170,
        SlaveAddressBinding = 171,
        SlaveProxyEnable = 172,
        LastNotifyRecord = 173,
        ScheduleDefault = 174,
        AcceptedModes = 175,
        AdjustValue = 176,
        Count = 177,
        CountBeforeChange = 178,
        CountChangeTime = 179,
        CovPeriod = 180,
        InputReference = 181,
        LimitMonitoringInterval = 182,
        LoggingObject = 183,
        LoggingRecord = 184,
        Prescale = 185,
        PulseRate = 186,
        Scale = 187,
        ScaleFactor = 188,
        UpdateTime = 189,
        ValueBeforeChange = 190,
        ValueSet = 191,
        ValueChangeTime = 192,
        AlignIntervals = 193,
        IntervalOffset = 195,
        LastRestartReason = 196,
        LoggingType = 197,
        RestartNotificationRecipients = 202,
        TimeOfDeviceRestart = 203,
        TimeSynchronizationInterval = 204,
        Trigger = 205,
        UtcTimeSynchronizationRecipients = 206,
        DoorAlarmState = 226,
        DoorExtendedPulseTime = 227,
        DoorMembers = 228,
        DoorOpenTooLongTime = 229,
        DoorPulseTime = 230,
        DoorStatus = 231,
        DoorUnlockDelayTime = 232,
        SecuredStatus = 235,
        CredentialDisable = 263,
        UserInformationReference = 311,
        NetworkAccessSecurityPolicies = 332,
        InterfaceValue = 387,
        FaultHighLimit = 388,
        FaultLowLimit = 389,
        StateChangeValues = 396,
        BbmdAcceptFdRegistrations = 413,
        BbmdBroadcastDistributionTable = 414,
        BbmdForeignDeviceTable = 415,
        OperationDirection = 477,
        PassengerAlarm = 478,
    },
    u32,
    512..=4194303
);
